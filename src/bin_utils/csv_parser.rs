use std::io::Read;

use crate::{card::Pin, command::OperationKind};
use csv::{Reader, StringRecord, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Number a script uses to refer to a card it issued earlier.
pub type CardLabel = u16;

#[derive(Debug, Deserialize)]
pub struct Operation {
    #[serde(rename = "type")]
    pub kind: OperationKind,
    pub card: CardLabel,
    pub pin: Pin,
    pub amount: Option<Decimal>,
}

/// Parses a list of card operations in CSV format, yielding each row with the
/// line it started on.
pub struct CsvOperationParser<R> {
    reader: Reader<R>,
    headers: StringRecord,
    record: StringRecord,
    exhausted: bool,
}

impl<R> CsvOperationParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> csv::Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);
        let headers = reader.headers()?.clone();

        Ok(Self {
            reader,
            headers,
            record: StringRecord::new(),
            exhausted: false,
        })
    }
}

impl<R> Iterator for CsvOperationParser<R>
where
    R: Read,
{
    type Item = (u64, csv::Result<Operation>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        match self.reader.read_record(&mut self.record) {
            Ok(false) => {
                self.exhausted = true;
                None
            }
            Ok(true) => {
                let line = self.record.position().map_or(0, |pos| pos.line());
                Some((line, self.record.deserialize(Some(&self.headers))))
            }
            Err(err) => {
                // the underlying reader is broken, nothing more will come out of it
                self.exhausted = err.is_io_error();
                let line = err.position().map_or(0, |pos| pos.line());
                Some((line, Err(err)))
            }
        }
    }
}

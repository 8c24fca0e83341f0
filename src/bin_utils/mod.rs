//! This module could be a separate crate on its own, to drive [`card_ledger`] from a script,
//! but for simplicity it is included in the library so integration tests can use it.

use std::{
    collections::HashMap,
    io::{Read, Write},
};

use crate::{
    card::Card,
    command::{AccountCommandError, OperationKind},
    ledger::{BalanceResult, CardService, LedgerError, in_memory_ledger::InMemoryLedger},
};
use anyhow::{Context, Result};
use csv_parser::{CardLabel, CsvOperationParser, Operation};
use csv_printer::{IssueResult, OperationResult, Outcome, print_outcomes};
use thiserror::Error;
pub mod csv_parser;
pub mod csv_printer;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Malformed row: {0}")]
    Parse(#[from] csv::Error),
    #[error(transparent)]
    CommandErr(#[from] AccountCommandError),
    #[error(transparent)]
    LedgerErr(#[from] LedgerError),
}

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub error_printer: Box<dyn FnMut(u64, ScriptError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvOperationParser::new(self.input).context("Failed to read CSV headers")?;

        let ledger = InMemoryLedger::new();
        let mut script = Script {
            ledger: &ledger,
            cards: HashMap::new(),
        };
        let mut outcomes = Vec::new();

        for (line, row) in parser {
            match row
                .map_err(ScriptError::from)
                .and_then(|op| script.execute(line, op))
            {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => (self.error_printer)(line, err),
            }
        }

        print_outcomes(self.output, outcomes.into_iter())
    }
}

/// Binds script card labels to the cards the ledger actually issued.
struct Script<'l, S> {
    ledger: &'l S,
    cards: HashMap<CardLabel, Card>,
}

impl<S> Script<'_, S>
where
    S: CardService,
{
    fn execute(&mut self, line: u64, op: Operation) -> Result<Outcome, ScriptError> {
        let amount = op.kind.require_amount(op.amount)?;
        let mut balance = None;

        let result = match op.kind {
            OperationKind::Issue => {
                let card = self.ledger.issue_card(op.pin, amount);
                self.cards.insert(op.card, card);
                OperationResult::Issue(IssueResult::Issued)
            }
            OperationKind::Balance => {
                let (result, current) = self.ledger.balance(&self.card(op.card), op.pin);
                if result == BalanceResult::Success {
                    balance = Some(current);
                }
                OperationResult::Balance(result)
            }
            OperationKind::Withdraw => OperationResult::Withdraw(self.ledger.withdraw(
                &self.card(op.card),
                op.pin,
                amount,
            )?),
            OperationKind::Deposit => OperationResult::Deposit(self.ledger.deposit(
                &self.card(op.card),
                op.pin,
                amount,
            )?),
        };

        Ok(Outcome {
            line,
            kind: op.kind,
            card: op.card,
            result,
            balance,
        })
    }

    // Labels the script never issued resolve to a card the ledger has never seen.
    fn card(&self, label: CardLabel) -> Card {
        self.cards
            .get(&label)
            .copied()
            .unwrap_or_else(Card::generate)
    }
}

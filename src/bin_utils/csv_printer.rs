use std::io::Write;

use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    command::OperationKind,
    ledger::{BalanceResult, DepositResult, WithdrawResult},
};

use super::csv_parser::CardLabel;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IssueResult {
    Issued,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum OperationResult {
    Issue(IssueResult),
    Balance(BalanceResult),
    Withdraw(WithdrawResult),
    Deposit(DepositResult),
}

#[derive(Debug, Serialize)]
pub struct Outcome {
    pub line: u64,
    #[serde(rename = "type")]
    pub kind: OperationKind,
    pub card: CardLabel,
    pub result: OperationResult,
    pub balance: Option<Decimal>,
}

pub fn print_outcomes<W>(
    output: &mut W,
    outcomes: impl Iterator<Item = Outcome>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for outcome in outcomes {
        if let Err(err) = writer.serialize(outcome) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    // Ensure all data is flushed to the output
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_result_codes_in_snake_case() {
        let outcomes = vec![
            Outcome {
                line: 2,
                kind: OperationKind::Issue,
                card: 1,
                result: OperationResult::Issue(IssueResult::Issued),
                balance: None,
            },
            Outcome {
                line: 3,
                kind: OperationKind::Withdraw,
                card: 1,
                result: OperationResult::Withdraw(WithdrawResult::InsufficientFunds),
                balance: None,
            },
            Outcome {
                line: 4,
                kind: OperationKind::Balance,
                card: 1,
                result: OperationResult::Balance(BalanceResult::Success),
                balance: Some(Decimal::new(15, 1)),
            },
        ];
        let mut output = Vec::new();
        print_outcomes(&mut output, outcomes.into_iter()).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "line,type,card,result,balance",
                "2,issue,1,issued,",
                "3,withdraw,1,insufficient_funds,",
                "4,balance,1,success,1.5",
            ]
        );
    }
}

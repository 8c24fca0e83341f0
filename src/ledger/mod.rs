use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::{
    account::AccountError,
    card::{Card, Pin},
    command::AccountCommandError,
};

pub mod in_memory_ledger;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error(transparent)]
    CommandErr(#[from] AccountCommandError),
    #[error(transparent)]
    AccountErr(#[from] AccountError),
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BalanceResult {
    Success,
    UnrecognisedCard,
    InvalidPin,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawResult {
    Success,
    UnrecognisedCard,
    InvalidPin,
    InsufficientFunds,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DepositResult {
    Success,
    UnrecognisedCard,
    InvalidPin,
}

/// Card operations exposed to whatever transport a caller puts in front of the ledger.
///
/// Domain outcomes (unknown card, wrong PIN, insufficient funds) are returned as result
/// codes and never change state. `Err` is reserved for faults: a negative amount, rejected
/// before any account is looked at, or a deposit that would overflow the balance.
pub trait CardService {
    fn issue_card(&self, pin: Pin, initial_deposit: Decimal) -> Card;

    /// Balance is [`Decimal::ZERO`] unless the result is [`BalanceResult::Success`].
    fn balance(&self, card: &Card, pin: Pin) -> (BalanceResult, Decimal);

    fn withdraw(
        &self,
        card: &Card,
        pin: Pin,
        amount: Decimal,
    ) -> Result<WithdrawResult, LedgerError>;

    fn deposit(
        &self,
        card: &Card,
        pin: Pin,
        amount: Decimal,
    ) -> Result<DepositResult, LedgerError>;
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Issue,
    Balance,
    Withdraw,
    Deposit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountAction {
    Withdraw,
    Deposit,
}

/// Balance mutation that has passed argument validation.
/// Only ever constructed through [`AccountCommand::parse_command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountCommand {
    action: AccountAction,
    amount: Decimal,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountCommandError {
    #[error("Amount is required for {kind:?}")]
    AmountRequired { kind: OperationKind },
    #[error("Amount must not be negative for {action:?}")]
    NegativeAmount { action: AccountAction },
}

impl AccountCommand {
    pub fn parse_command(
        action: AccountAction,
        amount: Decimal,
    ) -> Result<Self, AccountCommandError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(AccountCommandError::NegativeAmount { action });
        }
        Ok(Self { action, amount })
    }

    pub fn action(&self) -> AccountAction {
        self.action
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

impl OperationKind {
    /// Amount a script row must carry for this kind of operation.
    pub fn require_amount(self, amount: Option<Decimal>) -> Result<Decimal, AccountCommandError> {
        match (self, amount) {
            (_, Some(amount)) => Ok(amount),
            (OperationKind::Issue | OperationKind::Balance, None) => Ok(Decimal::ZERO),
            (OperationKind::Withdraw | OperationKind::Deposit, None) => {
                Err(AccountCommandError::AmountRequired { kind: self })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_negative_amount() {
        let err = AccountCommand::parse_command(AccountAction::Withdraw, Decimal::new(-1, 2))
            .unwrap_err();
        assert_eq!(
            err,
            AccountCommandError::NegativeAmount {
                action: AccountAction::Withdraw
            }
        );
        assert_eq!(err.to_string(), "Amount must not be negative for Withdraw");
    }

    #[test]
    fn parse_accepts_zero_and_positive() {
        // -0 is still zero
        let cmd = AccountCommand::parse_command(AccountAction::Deposit, -Decimal::ZERO).unwrap();
        assert!(cmd.amount().is_zero());
        let cmd = AccountCommand::parse_command(AccountAction::Deposit, Decimal::new(125, 2))
            .unwrap();
        assert_eq!(cmd.action(), AccountAction::Deposit);
        assert_eq!(cmd.amount(), Decimal::new(125, 2));
    }

    #[test]
    fn require_amount_per_kind() {
        assert_eq!(OperationKind::Issue.require_amount(None), Ok(Decimal::ZERO));
        assert_eq!(OperationKind::Balance.require_amount(None), Ok(Decimal::ZERO));
        assert_eq!(
            OperationKind::Deposit.require_amount(Some(Decimal::TEN)),
            Ok(Decimal::TEN)
        );
        assert_eq!(
            OperationKind::Withdraw.require_amount(None),
            Err(AccountCommandError::AmountRequired {
                kind: OperationKind::Withdraw
            })
        );
    }
}

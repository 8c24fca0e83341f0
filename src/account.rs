use parking_lot::Mutex;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    card::Card,
    command::{AccountAction, AccountCommand},
    hooks::CriticalRegionHooks,
};

#[derive(Debug, PartialEq, Eq)]
pub enum AccountEventKind {
    Deposited,
    Withdrawn,
}

#[derive(Debug)]
pub struct AccountEvent {
    amount: Decimal,
    kind: AccountEventKind,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Insufficient funds")]
    InsufficientFunds,
    #[error("Balance would overflow")]
    BalanceOverflow,
}

/// Balance as seen from inside the critical section.
#[derive(Debug, Default)]
pub struct AccountState {
    balance: Decimal,
}

impl AccountState {
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn apply(&mut self, event: &AccountEvent) {
        match event.kind {
            AccountEventKind::Deposited => {
                self.balance += event.amount;
            }
            AccountEventKind::Withdrawn => {
                self.balance -= event.amount;
            }
        }
    }

    pub fn handle_command(&self, command: &AccountCommand) -> Result<AccountEvent, AccountError> {
        let amount = command.amount();
        match command.action() {
            AccountAction::Deposit => {
                if self.balance.checked_add(amount).is_some() {
                    Ok(AccountEvent {
                        amount,
                        kind: AccountEventKind::Deposited,
                    })
                } else {
                    Err(AccountError::BalanceOverflow)
                }
            }
            AccountAction::Withdraw => {
                if self.balance >= amount {
                    Ok(AccountEvent {
                        amount,
                        kind: AccountEventKind::Withdrawn,
                    })
                } else {
                    Err(AccountError::InsufficientFunds)
                }
            }
        }
    }
}

/// Account bound to a single card, with its own exclusive lock.
#[derive(Debug)]
pub struct Account {
    card: Card,
    state: Mutex<AccountState>,
}

impl Account {
    pub(crate) fn new(card: Card, initial_deposit: Decimal) -> Self {
        Self {
            card,
            state: Mutex::new(AccountState {
                balance: initial_deposit,
            }),
        }
    }

    pub fn card(&self) -> Card {
        self.card
    }

    /// Last committed balance. Waits for an in-flight mutation to finish.
    pub fn balance(&self) -> Decimal {
        self.state.lock().balance()
    }

    /// Whether some thread currently holds this account's critical section.
    pub fn is_locked(&self) -> bool {
        self.state.is_locked()
    }

    /// Runs `command` inside the critical section and returns the resulting balance.
    ///
    /// The decision and the mutation happen under one hold of the lock, so no two
    /// commands on the same account can decide from the same starting balance.
    pub fn execute<H>(&self, command: &AccountCommand, hooks: &H) -> Result<Decimal, AccountError>
    where
        H: CriticalRegionHooks + ?Sized,
    {
        let mut state = self.state.lock();
        hooks.after_enter(self, state.balance());

        let outcome = state.handle_command(command).map(|event| {
            state.apply(&event);
            state.balance()
        });

        hooks.before_exit(self, state.balance());
        outcome
    }
}

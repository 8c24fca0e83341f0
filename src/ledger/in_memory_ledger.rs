use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::{
    account::{Account, AccountError},
    card::{Card, Pin},
    command::{AccountAction, AccountCommand},
    hooks::{CriticalRegionHooks, NoHooks},
};

use super::{BalanceResult, CardService, DepositResult, LedgerError, WithdrawResult};

#[derive(Debug)]
struct CardRecord {
    pin: Pin,
    account: Arc<Account>,
}

enum Authorization {
    Granted(Arc<Account>),
    UnrecognisedCard,
    InvalidPin,
}

/// Ledger holding every issued card and its account in process memory.
///
/// The card map lock is only held for lookups and issuance. Balance mutations
/// take the per-account lock instead, so operations on different cards never
/// wait on each other.
#[derive(Debug)]
pub struct InMemoryLedger<H = NoHooks> {
    cards: RwLock<HashMap<Card, CardRecord>>,
    hooks: H,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::with_hooks(NoHooks)
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> InMemoryLedger<H>
where
    H: CriticalRegionHooks,
{
    pub fn with_hooks(hooks: H) -> Self {
        Self {
            cards: RwLock::new(HashMap::new()),
            hooks,
        }
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Number of cards issued so far.
    pub fn len(&self) -> usize {
        self.cards.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // The map guard is released on return, before any account lock is taken.
    fn authorize(&self, card: &Card, pin: Pin) -> Authorization {
        let cards = self.cards.read();
        match cards.get(card) {
            None => Authorization::UnrecognisedCard,
            Some(record) if record.pin != pin => Authorization::InvalidPin,
            Some(record) => Authorization::Granted(Arc::clone(&record.account)),
        }
    }
}

impl<H> CardService for InMemoryLedger<H>
where
    H: CriticalRegionHooks,
{
    fn issue_card(&self, pin: Pin, initial_deposit: Decimal) -> Card {
        if initial_deposit.is_sign_negative() && !initial_deposit.is_zero() {
            warn!(%initial_deposit, "issuing card with a negative initial deposit");
        }
        let card = Card::generate();
        let record = CardRecord {
            pin,
            account: Arc::new(Account::new(card, initial_deposit)),
        };
        self.cards.write().insert(card, record);
        debug!(%card, "card issued");
        card
    }

    fn balance(&self, card: &Card, pin: Pin) -> (BalanceResult, Decimal) {
        match self.authorize(card, pin) {
            Authorization::UnrecognisedCard => (BalanceResult::UnrecognisedCard, Decimal::ZERO),
            Authorization::InvalidPin => (BalanceResult::InvalidPin, Decimal::ZERO),
            Authorization::Granted(account) => (BalanceResult::Success, account.balance()),
        }
    }

    fn withdraw(
        &self,
        card: &Card,
        pin: Pin,
        amount: Decimal,
    ) -> Result<WithdrawResult, LedgerError> {
        let command = AccountCommand::parse_command(AccountAction::Withdraw, amount)
            .inspect_err(|err| warn!(%card, %err, "withdraw rejected"))?;

        let account = match self.authorize(card, pin) {
            Authorization::UnrecognisedCard => return Ok(WithdrawResult::UnrecognisedCard),
            Authorization::InvalidPin => return Ok(WithdrawResult::InvalidPin),
            Authorization::Granted(account) => account,
        };

        let result = match account.execute(&command, &self.hooks) {
            Ok(balance) => {
                debug!(%card, %amount, %balance, "withdrawn");
                WithdrawResult::Success
            }
            Err(AccountError::InsufficientFunds) => {
                debug!(%card, %amount, "insufficient funds");
                WithdrawResult::InsufficientFunds
            }
            Err(err) => return Err(err.into()),
        };
        Ok(result)
    }

    fn deposit(
        &self,
        card: &Card,
        pin: Pin,
        amount: Decimal,
    ) -> Result<DepositResult, LedgerError> {
        let command = AccountCommand::parse_command(AccountAction::Deposit, amount)
            .inspect_err(|err| warn!(%card, %err, "deposit rejected"))?;

        let account = match self.authorize(card, pin) {
            Authorization::UnrecognisedCard => return Ok(DepositResult::UnrecognisedCard),
            Authorization::InvalidPin => return Ok(DepositResult::InvalidPin),
            Authorization::Granted(account) => account,
        };

        let balance = account
            .execute(&command, &self.hooks)
            .inspect_err(|err| warn!(%card, %amount, %err, "deposit rejected"))?;
        debug!(%card, %amount, %balance, "deposited");
        Ok(DepositResult::Success)
    }
}

use rust_decimal::Decimal;

use crate::account::Account;

/// Observation points around an account's critical section.
///
/// Both methods run while the account lock is held, so an implementation must not
/// call back into the ledger for the same account. Meant for tests that need to
/// force a particular interleaving; production code uses [`NoHooks`].
pub trait CriticalRegionHooks: Send + Sync {
    /// Called right after the account lock has been acquired, before the balance is inspected.
    fn after_enter(&self, _account: &Account, _balance: Decimal) {}

    /// Called right before the account lock is released, with the balance being left behind.
    fn before_exit(&self, _account: &Account, _balance: Decimal) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl CriticalRegionHooks for NoHooks {}

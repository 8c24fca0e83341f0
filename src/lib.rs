/// Opaque card tokens and PINs.
pub mod card;

/// Per-account balance and its critical section. The balance is modified
/// using events, which are created by handling commands.
pub mod account;

/// Validation of raw operation arguments into account commands.
pub mod command;

/// Injection points around an account's critical section.
pub mod hooks;

/// Card service interface and result codes, plus "in memory" implementation.
pub mod ledger;

/// Runs a CSV script of card operations against a fresh ledger. Lives in the
/// library so integration tests can drive it the same way the binary does.
pub mod bin_utils;

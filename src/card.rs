use std::fmt;

use uuid::Uuid;

pub type Pin = i32;

/// Opaque token handed out by the ledger when a card is issued.
///
/// Tokens are random, so a card issued by one ledger is never recognised by another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card(Uuid);

impl Card {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card-{}", self.0.simple())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_cards_are_distinct() {
        let a = Card::generate();
        let b = Card::generate();
        assert_ne!(a, b);
        assert_eq!(a, a);
        assert!(a.to_string().starts_with("card-"));
    }
}

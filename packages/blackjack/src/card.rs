use serde::{Deserialize, Serialize};
use std::fmt;

/// A playing card identified by rank only; suits never affect value.
///
/// Ranks run 1 through 13: 1 is the Ace, 11/12/13 are Jack, Queen, King.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidRank(pub u8);

impl fmt::Display for InvalidRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid card rank {} (expected 1-13)", self.0)
    }
}

impl std::error::Error for InvalidRank {}

impl Card {
    pub const ACE: Card = Card(1);
    pub const TEN: Card = Card(10);
    pub const KING: Card = Card(13);

    pub fn new(rank: u8) -> Result<Self, InvalidRank> {
        if (1..=13).contains(&rank) {
            Ok(Card(rank))
        } else {
            Err(InvalidRank(rank))
        }
    }

    pub fn rank(&self) -> u8 {
        self.0
    }

    /// Blackjack value with the Ace counted high.
    pub fn value(&self) -> u8 {
        match self.0 {
            1 => 11,
            r if r >= 10 => 10,
            r => r,
        }
    }

    pub fn is_ace(&self) -> bool {
        self.0 == 1
    }

    pub fn to_display(&self) -> String {
        match self.0 {
            1 => "A".to_string(),
            11 => "J".to_string(),
            12 => "Q".to_string(),
            13 => "K".to_string(),
            r => r.to_string(),
        }
    }
}

impl TryFrom<u8> for Card {
    type Error = InvalidRank;

    fn try_from(rank: u8) -> Result<Self, Self::Error> {
        Card::new(rank)
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> u8 {
        card.0
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_bounds() {
        assert!(Card::new(0).is_err());
        assert!(Card::new(14).is_err());
        assert_eq!(Card::new(1).unwrap(), Card::ACE);
        assert_eq!(Card::new(13).unwrap(), Card::KING);
    }

    #[test]
    fn test_values() {
        assert_eq!(Card::ACE.value(), 11);
        assert_eq!(Card::new(7).unwrap().value(), 7);
        assert_eq!(Card::new(11).unwrap().value(), 10);
        assert_eq!(Card::new(12).unwrap().value(), 10);
        assert_eq!(Card::KING.value(), 10);
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::ACE.to_display(), "A");
        assert_eq!(Card::new(9).unwrap().to_string(), "9");
        assert_eq!(Card::new(12).unwrap().to_display(), "Q");
    }

    #[test]
    fn test_invalid_rank_message() {
        let err = Card::new(20).unwrap_err();
        assert_eq!(err.to_string(), "invalid card rank 20 (expected 1-13)");
    }
}

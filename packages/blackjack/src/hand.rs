use crate::Card;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandOutcome {
    Win,
    Loss,
    Push,
    Blackjack,
}

impl HandOutcome {
    /// Compares a finished player hand with the finished dealer hand.
    pub fn evaluate(player: &[Card], dealer: &[Card]) -> Self {
        if is_busted(player) {
            return HandOutcome::Loss;
        }

        let player_bj = is_blackjack(player);
        let dealer_bj = is_blackjack(dealer);
        match (player_bj, dealer_bj) {
            (true, true) => return HandOutcome::Push,
            (true, false) => return HandOutcome::Blackjack,
            (false, true) => return HandOutcome::Loss,
            (false, false) => {}
        }

        if is_busted(dealer) {
            return HandOutcome::Win;
        }

        let p = calculate_hand_value(player);
        let d = calculate_hand_value(dealer);
        if p > d {
            HandOutcome::Win
        } else if p < d {
            HandOutcome::Loss
        } else {
            HandOutcome::Push
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HandOutcome::Win => "win",
            HandOutcome::Loss => "loss",
            HandOutcome::Push => "push",
            HandOutcome::Blackjack => "blackjack",
        }
    }
}

/// Calculate the value of a blackjack hand
pub fn calculate_hand_value(cards: &[Card]) -> u8 {
    let mut total: u16 = 0;
    let mut aces: u16 = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        total += card.value() as u16;
    }

    // Adjust for aces
    while total > 21 && aces > 0 {
        total -= 10; // Count ace as 1 instead of 11
        aces -= 1;
    }

    total.min(u8::MAX as u16) as u8
}

/// Check if a hand is soft (has an ace still counted as 11)
pub fn is_soft_hand(cards: &[Card]) -> bool {
    let hard: u16 = cards
        .iter()
        .map(|c| if c.is_ace() { 1 } else { c.value() as u16 })
        .sum();
    cards.iter().any(Card::is_ace) && hard + 10 <= 21
}

/// Check if a hand is busted
pub fn is_busted(cards: &[Card]) -> bool {
    calculate_hand_value(cards) > 21
}

/// Check if a hand is blackjack (21 with 2 cards)
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && calculate_hand_value(cards) == 21
}

/// Check if two cards can be split (same rank)
pub fn can_split_cards(card1: &Card, card2: &Card) -> bool {
    card1.rank() == card2.rank()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    pub cards: Vec<Card>,
    pub doubled: bool,
    pub done: bool,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self {
            cards,
            ..Self::default()
        }
    }

    pub fn value(&self) -> u8 {
        calculate_hand_value(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        is_soft_hand(&self.cards)
    }

    pub fn is_busted(&self) -> bool {
        is_busted(&self.cards)
    }

    pub fn is_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn can_split(&self) -> bool {
        self.cards.len() == 2 && can_split_cards(&self.cards[0], &self.cards[1])
    }

    /// Hit, stand and double are only open on a hand that is neither finished nor doubled.
    pub fn is_playable(&self) -> bool {
        !self.done && !self.doubled
    }
}

mod card;
mod dealer;
mod hand;
mod rules;

pub use card::{Card, InvalidRank};
pub use dealer::dealer_should_hit;
pub use hand::{
    calculate_hand_value, can_split_cards, is_blackjack, is_busted, is_soft_hand, Hand,
    HandOutcome,
};
pub use rules::{GameRules, PayoutRatio};

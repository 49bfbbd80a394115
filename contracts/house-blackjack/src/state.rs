use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, OverflowError, Uint128};
use cw_storage_plus::{Item, Map};

/// Winnings per unit staked, e.g. 3:2 for a blackjack.
#[cw_serde]
#[derive(Copy)]
pub struct PayoutRatio {
    pub numerator: u16,
    pub denominator: u16,
}

#[cw_serde]
pub struct Config {
    pub owner: Addr,
    pub denom: String,
    pub min_bet: Uint128,
    pub max_bet: Uint128,
    pub blackjack_payout: PayoutRatio, // e.g., 3:2 or 6:5
    pub insurance_payout: PayoutRatio, // e.g., 2:1
    pub standard_payout: PayoutRatio,  // e.g., 1:1
    pub dealer_hits_soft_17: bool,
}

#[cw_serde]
#[derive(Copy, Default, Eq)]
pub enum GameState {
    #[default]
    Idle,
    BetPlaced,
    PlayerTurn,
    DealerTurn,
    GameOver,
}

impl GameState {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::Idle => "idle",
            GameState::BetPlaced => "bet_placed",
            GameState::PlayerTurn => "player_turn",
            GameState::DealerTurn => "dealer_turn",
            GameState::GameOver => "game_over",
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cw_serde]
#[derive(Copy, Eq)]
pub enum HandId {
    First,
    Second,
}

impl HandId {
    pub fn number(&self) -> u8 {
        match self {
            HandId::First => 1,
            HandId::Second => 2,
        }
    }
}

impl fmt::Display for HandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Settled result of one player hand, kept on the record after GameOver.
#[cw_serde]
pub struct HandSettlement {
    pub hand: HandId,
    pub outcome: String,
    pub payout: Uint128,
}

/// Everything the house knows about one player's current round.
#[cw_serde]
#[derive(Default)]
pub struct GameRecord {
    pub state: GameState,
    pub bet: Uint128,
    pub bet2: Uint128,
    pub hand1: Vec<u8>,
    pub hand2: Vec<u8>,
    pub dealer_hand: Vec<u8>,
    pub has_split: bool,
    pub hand1_done: bool,
    pub hand2_done: bool,
    pub hand1_doubled: bool,
    pub hand2_doubled: bool,
    pub insurance_taken: bool,
    pub dealer_has_ace: bool,
    pub insurance_bet: Uint128,
    /// House funds escrowed against this round's largest possible payout.
    pub reserved: Uint128,
    pub results: Vec<HandSettlement>,
}

impl GameRecord {
    pub fn cards(&self, hand: HandId) -> &Vec<u8> {
        match hand {
            HandId::First => &self.hand1,
            HandId::Second => &self.hand2,
        }
    }

    pub fn cards_mut(&mut self, hand: HandId) -> &mut Vec<u8> {
        match hand {
            HandId::First => &mut self.hand1,
            HandId::Second => &mut self.hand2,
        }
    }

    pub fn hand_bet(&self, hand: HandId) -> Uint128 {
        match hand {
            HandId::First => self.bet,
            HandId::Second => self.bet2,
        }
    }

    pub fn set_hand_bet(&mut self, hand: HandId, amount: Uint128) {
        match hand {
            HandId::First => self.bet = amount,
            HandId::Second => self.bet2 = amount,
        }
    }

    pub fn is_done(&self, hand: HandId) -> bool {
        match hand {
            HandId::First => self.hand1_done,
            HandId::Second => self.hand2_done,
        }
    }

    pub fn mark_done(&mut self, hand: HandId) {
        match hand {
            HandId::First => self.hand1_done = true,
            HandId::Second => self.hand2_done = true,
        }
    }

    pub fn is_doubled(&self, hand: HandId) -> bool {
        match hand {
            HandId::First => self.hand1_doubled,
            HandId::Second => self.hand2_doubled,
        }
    }

    pub fn mark_doubled(&mut self, hand: HandId) {
        match hand {
            HandId::First => self.hand1_doubled = true,
            HandId::Second => self.hand2_doubled = true,
        }
    }

    /// Hands carrying a stake this round, hand 1 first.
    pub fn active_hands(&self) -> Vec<HandId> {
        if self.has_split {
            vec![HandId::First, HandId::Second]
        } else {
            vec![HandId::First]
        }
    }

    pub fn all_hands_done(&self) -> bool {
        self.active_hands().iter().all(|&h| self.is_done(h))
    }

    /// Sum of every stake the player has put into this round.
    pub fn total_staked(&self) -> Result<Uint128, OverflowError> {
        self.bet
            .checked_add(self.bet2)?
            .checked_add(self.insurance_bet)
    }
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const HOUSE_BANKROLL: Item<Uint128> = Item::new("house_bankroll");
pub const DRAW_NONCE: Item<u64> = Item::new("draw_nonce");
pub const GAMES: Map<&Addr, GameRecord> = Map::new("games");

use crate::HandOutcome;
use serde::{Deserialize, Serialize};

/// Payout multiplier as a ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutRatio {
    pub numerator: u16,
    pub denominator: u16,
}

impl PayoutRatio {
    pub const THREE_TO_TWO: Self = Self {
        numerator: 3,
        denominator: 2,
    };
    pub const SIX_TO_FIVE: Self = Self {
        numerator: 6,
        denominator: 5,
    };
    pub const TWO_TO_ONE: Self = Self {
        numerator: 2,
        denominator: 1,
    };
    pub const ONE_TO_ONE: Self = Self {
        numerator: 1,
        denominator: 1,
    };

    pub fn new(numerator: u16, denominator: u16) -> Result<Self, &'static str> {
        if denominator == 0 {
            return Err("Denominator cannot be zero");
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Winnings on top of the returned stake, rounded down.
    pub fn calculate_payout(&self, bet: u128) -> Option<u128> {
        bet.checked_mul(self.numerator as u128)?
            .checked_div(self.denominator as u128)
    }
}

/// Configurable table rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRules {
    /// Dealer hits on soft 17
    pub dealer_hits_soft_17: bool,

    /// Paid on a two-card 21 that the dealer does not match
    pub blackjack_payout: PayoutRatio,

    /// Paid on the insurance side bet when the dealer holds blackjack
    pub insurance_payout: PayoutRatio,

    /// Paid on every other winning hand
    pub standard_payout: PayoutRatio,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            dealer_hits_soft_17: false,
            blackjack_payout: PayoutRatio::THREE_TO_TWO,
            insurance_payout: PayoutRatio::TWO_TO_ONE,
            standard_payout: PayoutRatio::ONE_TO_ONE,
        }
    }
}

impl GameRules {
    /// Total returned to the player for a settled hand: stake plus winnings.
    pub fn hand_return(&self, outcome: HandOutcome, bet: u128) -> Option<u128> {
        match outcome {
            HandOutcome::Loss => Some(0),
            HandOutcome::Push => Some(bet),
            HandOutcome::Win => bet.checked_add(self.standard_payout.calculate_payout(bet)?),
            HandOutcome::Blackjack => {
                bet.checked_add(self.blackjack_payout.calculate_payout(bet)?)
            }
        }
    }

    /// Total returned on an insurance stake.
    pub fn insurance_return(&self, dealer_blackjack: bool, stake: u128) -> Option<u128> {
        if dealer_blackjack {
            stake.checked_add(self.insurance_payout.calculate_payout(stake)?)
        } else {
            Some(0)
        }
    }

    /// Largest winnings a hand can still earn beyond its stake.
    pub fn max_hand_winnings(&self, bet: u128, can_be_blackjack: bool) -> Option<u128> {
        let standard = self.standard_payout.calculate_payout(bet)?;
        if can_be_blackjack {
            Some(standard.max(self.blackjack_payout.calculate_payout(bet)?))
        } else {
            Some(standard)
        }
    }
}

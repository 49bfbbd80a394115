use blackjack::{calculate_hand_value, Card, GameRules, Hand, HandOutcome, PayoutRatio};
use cosmwasm_std::{StdError, Uint128};

use crate::entropy::CardSource;
use crate::error::ContractError;
use crate::state::{Config, GameRecord, HandId, HandSettlement};

/// Convert contract Config to blackjack GameRules
pub fn config_to_rules(config: &Config) -> GameRules {
    let ratio = |r: &crate::state::PayoutRatio| PayoutRatio {
        numerator: r.numerator,
        denominator: r.denominator,
    };
    GameRules {
        dealer_hits_soft_17: config.dealer_hits_soft_17,
        blackjack_payout: ratio(&config.blackjack_payout),
        insurance_payout: ratio(&config.insurance_payout),
        standard_payout: ratio(&config.standard_payout),
    }
}

/// Stored ranks back into cards. Anything outside 1-13 means the record is corrupt.
pub fn to_cards(ranks: &[u8]) -> Result<Vec<Card>, ContractError> {
    ranks
        .iter()
        .map(|&rank| Card::new(rank).map_err(|e| ContractError::InvalidCard { rank: e.0 }))
        .collect()
}

pub fn hand_value(ranks: &[u8]) -> Result<u8, ContractError> {
    Ok(calculate_hand_value(&to_cards(ranks)?))
}

/// One of the player's hands as the rules model sees it.
pub fn player_hand(record: &GameRecord, hand: HandId) -> Result<Hand, ContractError> {
    Ok(Hand {
        cards: to_cards(record.cards(hand))?,
        doubled: record.is_doubled(hand),
        done: record.is_done(hand),
    })
}

/// Pull one card from the source, rejecting ranks outside 1-13.
pub fn draw_card(source: &mut dyn CardSource) -> Result<u8, ContractError> {
    let rank = source.draw();
    Card::new(rank).map_err(|e| ContractError::InvalidCard { rank: e.0 })?;
    Ok(rank)
}

fn payout_overflow() -> ContractError {
    ContractError::Std(StdError::msg("payout calculation overflow"))
}

/// Most the house can still owe on this round beyond the stakes it holds.
pub fn exposure(record: &GameRecord, rules: &GameRules) -> Result<Uint128, ContractError> {
    let mut total = Uint128::zero();
    for hand in record.active_hands() {
        // A hand that already drew a third card can no longer be paid as blackjack
        let can_be_blackjack = record.cards(hand).len() <= 2 && !record.is_doubled(hand);
        let winnings = rules
            .max_hand_winnings(record.hand_bet(hand).u128(), can_be_blackjack)
            .ok_or_else(payout_overflow)?;
        total = total.checked_add(Uint128::new(winnings))?;
    }
    if record.insurance_taken {
        let winnings = rules
            .insurance_payout
            .calculate_payout(record.insurance_bet.u128())
            .ok_or_else(payout_overflow)?;
        total = total.checked_add(Uint128::new(winnings))?;
    }
    Ok(total)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub hands: Vec<HandSettlement>,
    /// Set only when insurance was taken
    pub insurance: Option<(bool, Uint128)>,
    pub payout: Uint128,
}

/// Outcome and return for every hand, plus the insurance side bet.
pub fn settle_record(record: &GameRecord, rules: &GameRules) -> Result<Settlement, ContractError> {
    let dealer = to_cards(&record.dealer_hand)?;
    let mut payout = Uint128::zero();
    let mut hands = Vec::with_capacity(2);

    for hand in record.active_hands() {
        let player = to_cards(record.cards(hand))?;
        let outcome = HandOutcome::evaluate(&player, &dealer);
        let returned = rules
            .hand_return(outcome, record.hand_bet(hand).u128())
            .ok_or_else(payout_overflow)?;
        let returned = Uint128::new(returned);
        payout = payout.checked_add(returned)?;
        hands.push(HandSettlement {
            hand,
            outcome: outcome.as_str().to_string(),
            payout: returned,
        });
    }

    let insurance = if record.insurance_taken {
        let dealer_blackjack = blackjack::is_blackjack(&dealer);
        let returned = rules
            .insurance_return(dealer_blackjack, record.insurance_bet.u128())
            .ok_or_else(payout_overflow)?;
        let returned = Uint128::new(returned);
        payout = payout.checked_add(returned)?;
        Some((dealer_blackjack, returned))
    } else {
        None
    };

    Ok(Settlement {
        hands,
        insurance,
        payout,
    })
}

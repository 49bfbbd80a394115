use blackjack::{dealer_should_hit, GameRules};
use cosmwasm_std::{Storage, Uint128};

use crate::entropy::CardSource;
use crate::error::ContractError;
use crate::events::{Notification, Notifier};
use crate::game_logic::{draw_card, exposure, hand_value, settle_record, to_cards};
use crate::state::{GameRecord, GameState, HandId, HOUSE_BANKROLL};

/// Moves house funds into the round's escrow until it covers the largest
/// payout the round can still produce.
pub fn reserve_exposure(
    storage: &mut dyn Storage,
    record: &mut GameRecord,
    rules: &GameRules,
) -> Result<(), ContractError> {
    let needed = exposure(record, rules)?;
    if needed <= record.reserved {
        return Ok(());
    }
    let shortfall = needed.checked_sub(record.reserved)?;
    let bankroll = HOUSE_BANKROLL.may_load(storage)?.unwrap_or_default();
    if bankroll < shortfall {
        return Err(ContractError::InsufficientBankroll {
            required: shortfall,
            available: bankroll,
        });
    }
    HOUSE_BANKROLL.save(storage, &bankroll.checked_sub(shortfall)?)?;
    record.reserved = needed;
    Ok(())
}

pub fn deal_to_player(
    record: &mut GameRecord,
    hand: HandId,
    source: &mut dyn CardSource,
    notifier: &mut Notifier,
) -> Result<u8, ContractError> {
    let card = draw_card(source)?;
    record.cards_mut(hand).push(card);
    notifier.emit(Notification::PlayerCardDealt { hand, card });
    Ok(card)
}

pub fn deal_to_dealer(
    record: &mut GameRecord,
    source: &mut dyn CardSource,
    notifier: &mut Notifier,
) -> Result<u8, ContractError> {
    let card = draw_card(source)?;
    record.dealer_hand.push(card);
    notifier.emit(Notification::DealerCardDealt { card });
    Ok(card)
}

/// Hit during the player's turn: bust or 21 closes the hand.
pub fn hit_hand(
    record: &mut GameRecord,
    hand: HandId,
    source: &mut dyn CardSource,
    notifier: &mut Notifier,
) -> Result<(), ContractError> {
    deal_to_player(record, hand, source, notifier)?;
    let value = hand_value(record.cards(hand))?;
    if value > 21 {
        record.mark_done(hand);
        notifier.emit(Notification::PlayerBust { hand, value });
    } else if value == 21 {
        record.mark_done(hand);
        notifier.emit(Notification::PlayerStood { hand });
    }
    Ok(())
}

/// Hands the table to the dealer once every player hand is finished, then
/// settles. Returns the amount owed to the player, or `None` while the
/// player still has a hand to play.
pub fn advance(
    storage: &mut dyn Storage,
    record: &mut GameRecord,
    rules: &GameRules,
    source: &mut dyn CardSource,
    notifier: &mut Notifier,
) -> Result<Option<Uint128>, ContractError> {
    if !record.all_hands_done() {
        record.state = GameState::PlayerTurn;
        return Ok(None);
    }
    record.state = GameState::DealerTurn;
    play_dealer(record, rules, source, notifier)?;
    record.state = GameState::GameOver;
    settle(storage, record, rules, notifier).map(Some)
}

fn play_dealer(
    record: &mut GameRecord,
    rules: &GameRules,
    source: &mut dyn CardSource,
    notifier: &mut Notifier,
) -> Result<(), ContractError> {
    let all_busted = record
        .active_hands()
        .into_iter()
        .map(|h| hand_value(record.cards(h)))
        .collect::<Result<Vec<_>, _>>()?
        .iter()
        .all(|&v| v > 21);

    if all_busted {
        // Only the insurance bet is still live; the hole card decides it
        if record.insurance_taken && record.dealer_hand.len() < 2 {
            deal_to_dealer(record, source, notifier)?;
        }
        return Ok(());
    }

    while dealer_should_hit(&to_cards(&record.dealer_hand)?, rules) {
        deal_to_dealer(record, source, notifier)?;
    }

    let value = hand_value(&record.dealer_hand)?;
    if value > 21 {
        notifier.emit(Notification::DealerBust { value });
    }
    Ok(())
}

/// Pays out every hand and the insurance bet, then returns the stakes and
/// escrow the player did not win to the bankroll.
fn settle(
    storage: &mut dyn Storage,
    record: &mut GameRecord,
    rules: &GameRules,
    notifier: &mut Notifier,
) -> Result<Uint128, ContractError> {
    let settlement = settle_record(record, rules)?;

    let pot = record.total_staked()?.checked_add(record.reserved)?;
    let house_take = pot
        .checked_sub(settlement.payout)
        .map_err(|_| ContractError::Conservation {
            payout: settlement.payout,
            pot,
        })?;

    let bankroll = HOUSE_BANKROLL.may_load(storage)?.unwrap_or_default();
    HOUSE_BANKROLL.save(storage, &bankroll.checked_add(house_take)?)?;
    record.reserved = Uint128::zero();

    for result in &settlement.hands {
        notifier.emit(Notification::GameResult {
            hand: result.hand,
            outcome: result.outcome.clone(),
            payout: result.payout,
        });
    }
    if let Some((dealer_blackjack, payout)) = settlement.insurance {
        notifier.emit(Notification::InsuranceResult {
            dealer_blackjack,
            payout,
        });
    }
    record.results = settlement.hands;

    Ok(settlement.payout)
}

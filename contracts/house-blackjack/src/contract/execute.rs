use blackjack::{is_blackjack, Card};
#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{Addr, BankMsg, Coin, DepsMut, Env, MessageInfo, Response, Storage, Uint128};

use crate::contract::play::{advance, deal_to_dealer, deal_to_player, hit_hand, reserve_exposure};
use crate::entropy::{BlockEntropy, CardSource};
use crate::error::ContractError;
use crate::events::{Notification, Notifier};
use crate::game_logic::{config_to_rules, hand_value, player_hand, to_cards};
use crate::msg::ExecuteMsg;
use crate::state::{
    Config, GameRecord, GameState, HandId, CONFIG, DRAW_NONCE, GAMES, HOUSE_BANKROLL,
};

pub const MAX_HIT_COUNT: u8 = 10;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    let nonce = DRAW_NONCE.may_load(deps.storage)?.unwrap_or_default();
    DRAW_NONCE.save(deps.storage, &nonce.wrapping_add(1))?;

    let mut source = BlockEntropy::new(&env, &info.sender, nonce);
    deps.api
        .debug(&format!("draw nonce {nonce}, seed {}", source.seed_hex()));

    execute_with_source(deps, info, msg, &mut source)
}

/// Dispatch with an explicit card source so tests can stack the deck.
pub fn execute_with_source(
    deps: DepsMut,
    info: MessageInfo,
    msg: ExecuteMsg,
    source: &mut dyn CardSource,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::PlaceBet {} => execute_place_bet(deps, info),
        ExecuteMsg::DealInitialCards {} => execute_deal_initial_cards(deps, info, source),
        ExecuteMsg::Hit { hand } => execute_hit(deps, info, hand, 1, source),
        ExecuteMsg::HitMultiple { hand, count } => execute_hit(deps, info, hand, count, source),
        ExecuteMsg::Stand { hand } => execute_stand(deps, info, hand, source),
        ExecuteMsg::DoubleDown { hand } => execute_double_down(deps, info, hand, source),
        ExecuteMsg::Split {} => execute_split(deps, info, source),
        ExecuteMsg::TakeInsurance {} => execute_take_insurance(deps, info),
        ExecuteMsg::ResetGame {} => execute_reset_game(deps, info),
        ExecuteMsg::FundBankroll {} => execute_fund_bankroll(deps, info),
        ExecuteMsg::WithdrawAll {} => execute_withdraw_all(deps, info),
    }
}

/// Total of the configured denom attached to the message. Any other denom is refused.
pub fn paid_amount(info: &MessageInfo, denom: &str) -> Result<Uint128, ContractError> {
    let mut total = Uint128::zero();
    for coin in &info.funds {
        if coin.denom != denom {
            return Err(ContractError::UnexpectedDenom {
                denom: coin.denom.clone(),
            });
        }
        total = total.checked_add(Uint128::try_from(coin.amount)?)?;
    }
    if total.is_zero() {
        return Err(ContractError::NoFunds {
            denom: denom.to_string(),
        });
    }
    Ok(total)
}

fn nonpayable(info: &MessageInfo) -> Result<(), ContractError> {
    if info.funds.iter().any(|c| !c.amount.is_zero()) {
        return Err(ContractError::NonPayable);
    }
    Ok(())
}

fn exact_stake(
    info: &MessageInfo,
    denom: &str,
    action: &'static str,
    expected: Uint128,
) -> Result<Uint128, ContractError> {
    let received = paid_amount(info, denom)?;
    if received != expected {
        return Err(ContractError::StakeMismatch {
            action,
            expected,
            received,
        });
    }
    Ok(received)
}

fn load_record(storage: &dyn Storage, player: &Addr) -> Result<GameRecord, ContractError> {
    Ok(GAMES.may_load(storage, player)?.unwrap_or_default())
}

fn require_state(
    record: &GameRecord,
    expected: GameState,
    action: &'static str,
) -> Result<(), ContractError> {
    if record.state != expected {
        return Err(ContractError::InvalidState {
            action,
            state: record.state,
        });
    }
    Ok(())
}

/// Hit, stand and double target a hand that exists, is still open and,
/// for the second hand, only once the first is finished.
fn require_playable(record: &GameRecord, hand: HandId) -> Result<(), ContractError> {
    if hand == HandId::Second {
        if !record.has_split {
            return Err(ContractError::NoSecondHand { hand });
        }
        if !record.hand1_done {
            return Err(ContractError::FirstHandPending { hand });
        }
    }
    if !player_hand(record, hand)?.is_playable() {
        return Err(ContractError::HandFinished { hand });
    }
    Ok(())
}

/// Saves the record and attaches events plus the payout transfer, which
/// always goes last.
fn finish(
    storage: &mut dyn Storage,
    config: &Config,
    player: &Addr,
    record: &GameRecord,
    payout: Option<Uint128>,
    notifier: Notifier,
    response: Response,
) -> Result<Response, ContractError> {
    GAMES.save(storage, player, record)?;

    let mut response = response
        .add_attribute("state", record.state.as_str())
        .add_events(notifier.into_events());
    if let Some(payout) = payout {
        response = response.add_attribute("payout", payout);
        if !payout.is_zero() {
            response = response.add_message(BankMsg::Send {
                to_address: player.to_string(),
                amount: vec![Coin {
                    denom: config.denom.clone(),
                    amount: payout.into(),
                }],
            });
        }
    }
    Ok(response)
}

pub fn execute_place_bet(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let player = info.sender.clone();
    let record = load_record(deps.storage, &player)?;

    if !matches!(record.state, GameState::Idle | GameState::GameOver) {
        return Err(ContractError::GameInProgress);
    }

    let bet = paid_amount(&info, &config.denom)?;
    if bet < config.min_bet {
        return Err(ContractError::BetTooLow {
            min: config.min_bet,
        });
    }
    if bet > config.max_bet {
        return Err(ContractError::BetTooHigh {
            max: config.max_bet,
        });
    }

    let mut record = GameRecord {
        state: GameState::BetPlaced,
        bet,
        ..GameRecord::default()
    };
    reserve_exposure(deps.storage, &mut record, &config_to_rules(&config))?;

    let mut notifier = Notifier::new(player.clone());
    notifier.emit(Notification::GameStarted { bet });

    let response = Response::new()
        .add_attribute("action", "place_bet")
        .add_attribute("player", player.as_str())
        .add_attribute("bet", bet)
        .add_attribute("reserved", record.reserved);
    finish(
        deps.storage,
        &config,
        &player,
        &record,
        None,
        notifier,
        response,
    )
}

pub fn execute_deal_initial_cards(
    deps: DepsMut,
    info: MessageInfo,
    source: &mut dyn CardSource,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = CONFIG.load(deps.storage)?;
    let rules = config_to_rules(&config);
    let player = info.sender;
    let mut record = load_record(deps.storage, &player)?;
    require_state(&record, GameState::BetPlaced, "deal")?;

    let mut notifier = Notifier::new(player.clone());
    deal_to_player(&mut record, HandId::First, source, &mut notifier)?;
    let up_card = deal_to_dealer(&mut record, source, &mut notifier)?;
    deal_to_player(&mut record, HandId::First, source, &mut notifier)?;
    record.dealer_has_ace = up_card == Card::ACE.rank();

    let payout = if is_blackjack(&to_cards(&record.hand1)?) {
        record.mark_done(HandId::First);
        advance(deps.storage, &mut record, &rules, source, &mut notifier)?
    } else {
        record.state = GameState::PlayerTurn;
        None
    };

    let response = Response::new()
        .add_attribute("action", "deal_initial_cards")
        .add_attribute("player", player.as_str())
        .add_attribute("player_value", hand_value(&record.hand1)?.to_string());
    finish(
        deps.storage,
        &config,
        &player,
        &record,
        payout,
        notifier,
        response,
    )
}

/// Serves both `Hit` and `HitMultiple`; drawing stops early once the hand closes.
pub fn execute_hit(
    deps: DepsMut,
    info: MessageInfo,
    hand: HandId,
    count: u8,
    source: &mut dyn CardSource,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    if count == 0 || count > MAX_HIT_COUNT {
        return Err(ContractError::InvalidHitCount { max: MAX_HIT_COUNT });
    }
    let config = CONFIG.load(deps.storage)?;
    let rules = config_to_rules(&config);
    let player = info.sender;
    let mut record = load_record(deps.storage, &player)?;
    require_state(&record, GameState::PlayerTurn, "hit")?;
    require_playable(&record, hand)?;

    let mut notifier = Notifier::new(player.clone());
    let mut drawn = 0u8;
    while drawn < count && !record.is_done(hand) {
        hit_hand(&mut record, hand, source, &mut notifier)?;
        drawn += 1;
    }
    let payout = advance(deps.storage, &mut record, &rules, source, &mut notifier)?;

    let response = Response::new()
        .add_attribute("action", if count == 1 { "hit" } else { "hit_multiple" })
        .add_attribute("player", player.as_str())
        .add_attribute("hand", hand.to_string())
        .add_attribute("cards_drawn", drawn.to_string())
        .add_attribute("hand_value", hand_value(record.cards(hand))?.to_string());
    finish(
        deps.storage,
        &config,
        &player,
        &record,
        payout,
        notifier,
        response,
    )
}

pub fn execute_stand(
    deps: DepsMut,
    info: MessageInfo,
    hand: HandId,
    source: &mut dyn CardSource,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = CONFIG.load(deps.storage)?;
    let rules = config_to_rules(&config);
    let player = info.sender;
    let mut record = load_record(deps.storage, &player)?;
    require_state(&record, GameState::PlayerTurn, "stand")?;
    require_playable(&record, hand)?;

    let mut notifier = Notifier::new(player.clone());
    record.mark_done(hand);
    notifier.emit(Notification::PlayerStood { hand });
    let payout = advance(deps.storage, &mut record, &rules, source, &mut notifier)?;

    let response = Response::new()
        .add_attribute("action", "stand")
        .add_attribute("player", player.as_str())
        .add_attribute("hand", hand.to_string());
    finish(
        deps.storage,
        &config,
        &player,
        &record,
        payout,
        notifier,
        response,
    )
}

pub fn execute_double_down(
    deps: DepsMut,
    info: MessageInfo,
    hand: HandId,
    source: &mut dyn CardSource,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let rules = config_to_rules(&config);
    let player = info.sender.clone();
    let mut record = load_record(deps.storage, &player)?;
    require_state(&record, GameState::PlayerTurn, "double down")?;
    require_playable(&record, hand)?;
    if record.cards(hand).len() != 2 {
        return Err(ContractError::CannotDouble { hand });
    }

    let stake = exact_stake(&info, &config.denom, "double down", record.hand_bet(hand))?;
    let new_bet = record.hand_bet(hand).checked_add(stake)?;
    record.set_hand_bet(hand, new_bet);
    record.mark_doubled(hand);
    reserve_exposure(deps.storage, &mut record, &rules)?;

    let mut notifier = Notifier::new(player.clone());
    notifier.emit(Notification::DoubleDown { hand, new_bet });
    deal_to_player(&mut record, hand, source, &mut notifier)?;
    let value = hand_value(record.cards(hand))?;
    record.mark_done(hand);
    if value > 21 {
        notifier.emit(Notification::PlayerBust { hand, value });
    } else {
        notifier.emit(Notification::PlayerStood { hand });
    }
    let payout = advance(deps.storage, &mut record, &rules, source, &mut notifier)?;

    let response = Response::new()
        .add_attribute("action", "double_down")
        .add_attribute("player", player.as_str())
        .add_attribute("hand", hand.to_string())
        .add_attribute("new_bet", new_bet);
    finish(
        deps.storage,
        &config,
        &player,
        &record,
        payout,
        notifier,
        response,
    )
}

pub fn execute_split(
    deps: DepsMut,
    info: MessageInfo,
    source: &mut dyn CardSource,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let rules = config_to_rules(&config);
    let player = info.sender.clone();
    let mut record = load_record(deps.storage, &player)?;
    require_state(&record, GameState::PlayerTurn, "split")?;

    if record.has_split {
        return Err(ContractError::CannotSplit {
            reason: "hand has already been split",
        });
    }
    let first = player_hand(&record, HandId::First)?;
    if !first.is_playable() {
        return Err(ContractError::CannotSplit {
            reason: "first hand is finished",
        });
    }
    if !first.can_split() {
        return Err(ContractError::CannotSplit {
            reason: "hand must be exactly two cards of equal rank",
        });
    }

    let stake = exact_stake(&info, &config.denom, "split", record.bet)?;
    let moved = match record.hand1.pop() {
        Some(card) => card,
        None => {
            return Err(ContractError::CannotSplit {
                reason: "hand must be exactly two cards of equal rank",
            })
        }
    };
    record.hand2 = vec![moved];
    record.has_split = true;
    record.bet2 = stake;
    reserve_exposure(deps.storage, &mut record, &rules)?;

    let mut notifier = Notifier::new(player.clone());
    notifier.emit(Notification::Split { bet: stake });
    deal_to_player(&mut record, HandId::First, source, &mut notifier)?;
    deal_to_player(&mut record, HandId::Second, source, &mut notifier)?;

    let response = Response::new()
        .add_attribute("action", "split")
        .add_attribute("player", player.as_str())
        .add_attribute("bet", stake);
    finish(
        deps.storage,
        &config,
        &player,
        &record,
        None,
        notifier,
        response,
    )
}

pub fn execute_take_insurance(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let rules = config_to_rules(&config);
    let player = info.sender.clone();
    let mut record = load_record(deps.storage, &player)?;
    require_state(&record, GameState::PlayerTurn, "take insurance")?;

    if !record.dealer_has_ace {
        return Err(ContractError::CannotInsure {
            reason: "dealer is not showing an ace",
        });
    }
    if record.insurance_taken {
        return Err(ContractError::CannotInsure {
            reason: "insurance already taken",
        });
    }
    let expected = Uint128::new(record.bet.u128() / 2);
    if expected.is_zero() {
        return Err(ContractError::CannotInsure {
            reason: "bet is too small to insure",
        });
    }

    let amount = exact_stake(&info, &config.denom, "insurance", expected)?;
    record.insurance_taken = true;
    record.insurance_bet = amount;
    reserve_exposure(deps.storage, &mut record, &rules)?;

    let mut notifier = Notifier::new(player.clone());
    notifier.emit(Notification::InsuranceTaken { amount });

    let response = Response::new()
        .add_attribute("action", "take_insurance")
        .add_attribute("player", player.as_str())
        .add_attribute("amount", amount);
    finish(
        deps.storage,
        &config,
        &player,
        &record,
        None,
        notifier,
        response,
    )
}

pub fn execute_reset_game(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = CONFIG.load(deps.storage)?;
    let player = info.sender;
    let record = load_record(deps.storage, &player)?;

    let refund = match record.state {
        GameState::PlayerTurn | GameState::DealerTurn => {
            return Err(ContractError::ActivePlayingState)
        }
        // No card has been seen yet: hand the stake back, release the escrow
        GameState::BetPlaced => {
            let bankroll = HOUSE_BANKROLL.may_load(deps.storage)?.unwrap_or_default();
            HOUSE_BANKROLL.save(deps.storage, &bankroll.checked_add(record.reserved)?)?;
            record.total_staked()?
        }
        GameState::Idle | GameState::GameOver => Uint128::zero(),
    };

    let mut notifier = Notifier::new(player.clone());
    notifier.emit(Notification::GameReset { refund });

    let response = Response::new()
        .add_attribute("action", "reset_game")
        .add_attribute("player", player.as_str())
        .add_attribute("refund", refund);
    finish(
        deps.storage,
        &config,
        &player,
        &GameRecord::default(),
        Some(refund),
        notifier,
        response,
    )
}

pub fn execute_fund_bankroll(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let amount = paid_amount(&info, &config.denom)?;
    let bankroll = HOUSE_BANKROLL.may_load(deps.storage)?.unwrap_or_default();
    let balance = bankroll.checked_add(amount)?;
    HOUSE_BANKROLL.save(deps.storage, &balance)?;

    let mut notifier = Notifier::new(info.sender.clone());
    notifier.emit(Notification::BankrollFunded { amount });

    Ok(Response::new()
        .add_attribute("action", "fund_bankroll")
        .add_attribute("funder", info.sender)
        .add_attribute("amount", amount)
        .add_attribute("bankroll", balance)
        .add_events(notifier.into_events()))
}

pub fn execute_withdraw_all(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let amount = HOUSE_BANKROLL.may_load(deps.storage)?.unwrap_or_default();
    if amount.is_zero() {
        return Err(ContractError::NothingToWithdraw);
    }
    HOUSE_BANKROLL.save(deps.storage, &Uint128::zero())?;

    let mut notifier = Notifier::new(info.sender.clone());
    notifier.emit(Notification::BankrollWithdrawn { amount });

    Ok(Response::new()
        .add_attribute("action", "withdraw_all")
        .add_attribute("owner", info.sender.as_str())
        .add_attribute("amount", amount)
        .add_events(notifier.into_events())
        .add_message(BankMsg::Send {
            to_address: info.sender.to_string(),
            amount: vec![Coin {
                denom: config.denom,
                amount: amount.into(),
            }],
        }))
}

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_json_binary, Binary, Deps, Env, StdError, StdResult};

use crate::game_logic::hand_value;
use crate::msg::{
    BankrollResponse, GameResponse, GameStateResponse, HandResponse, HandValueResponse, QueryMsg,
    Seat,
};
use crate::state::{Config, GameRecord, CONFIG, GAMES, HOUSE_BANKROLL};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::GetConfig {} => to_json_binary(&query_config(deps)?),
        QueryMsg::GetGame { player } => to_json_binary(&query_game(deps, player)?),
        QueryMsg::GetGameState { player } => to_json_binary(&GameStateResponse {
            state: load_record(deps, &player)?.state,
        }),
        QueryMsg::GetPlayerHand { player } => {
            to_json_binary(&hand_response(&load_record(deps, &player)?.hand1)?)
        }
        QueryMsg::GetPlayerHand2 { player } => {
            to_json_binary(&hand_response(&load_record(deps, &player)?.hand2)?)
        }
        QueryMsg::GetDealerHand { player } => {
            to_json_binary(&hand_response(&load_record(deps, &player)?.dealer_hand)?)
        }
        QueryMsg::GetHandValue { player, seat } => {
            to_json_binary(&query_hand_value(deps, player, seat)?)
        }
        QueryMsg::GetHand2Value { player } => to_json_binary(&HandValueResponse {
            value: value_of(&load_record(deps, &player)?.hand2)?,
        }),
        QueryMsg::GetBankroll {} => to_json_binary(&query_bankroll(deps)?),
    }
}

/// Unknown players read as an idle, empty record.
fn load_record(deps: Deps, player: &str) -> StdResult<GameRecord> {
    let addr = deps.api.addr_validate(player)?;
    Ok(GAMES.may_load(deps.storage, &addr)?.unwrap_or_default())
}

fn value_of(cards: &[u8]) -> StdResult<u8> {
    hand_value(cards).map_err(|e| StdError::msg(e.to_string()))
}

fn hand_response(cards: &[u8]) -> StdResult<HandResponse> {
    Ok(HandResponse {
        cards: cards.to_vec(),
        value: value_of(cards)?,
    })
}

fn query_config(deps: Deps) -> StdResult<Config> {
    let config = CONFIG.load(deps.storage)?;
    Ok(config)
}

fn query_game(deps: Deps, player: String) -> StdResult<GameResponse> {
    let game = load_record(deps, &player)?;

    Ok(GameResponse {
        player,
        state: game.state,
        bet: game.bet,
        bet2: game.bet2,
        hand1: hand_response(&game.hand1)?,
        hand2: hand_response(&game.hand2)?,
        dealer_hand: hand_response(&game.dealer_hand)?,
        has_split: game.has_split,
        hand1_done: game.hand1_done,
        hand2_done: game.hand2_done,
        hand1_doubled: game.hand1_doubled,
        hand2_doubled: game.hand2_doubled,
        insurance_taken: game.insurance_taken,
        dealer_has_ace: game.dealer_has_ace,
        insurance_bet: game.insurance_bet,
        reserved: game.reserved,
        results: game.results,
    })
}

fn query_hand_value(deps: Deps, player: String, seat: Seat) -> StdResult<HandValueResponse> {
    let game = load_record(deps, &player)?;
    let cards = match seat {
        Seat::Player => &game.hand1,
        Seat::Dealer => &game.dealer_hand,
    };
    Ok(HandValueResponse {
        value: value_of(cards)?,
    })
}

fn query_bankroll(deps: Deps) -> StdResult<BankrollResponse> {
    let balance = HOUSE_BANKROLL.may_load(deps.storage)?.unwrap_or_default();
    Ok(BankrollResponse { balance })
}

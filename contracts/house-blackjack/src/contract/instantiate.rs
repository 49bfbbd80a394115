#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{DepsMut, Env, MessageInfo, Response, Uint128};
use cw2::set_contract_version;

use crate::contract::execute::paid_amount;
use crate::error::ContractError;
use crate::msg::{InstantiateMsg, PayoutRatio};
use crate::state::{Config, CONFIG, DRAW_NONCE, HOUSE_BANKROLL};

const CONTRACT_NAME: &str = "crates.io:house-blackjack";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    if msg.denom.is_empty() {
        return Err(ContractError::InvalidConfig("denom must not be empty".to_string()));
    }
    if msg.min_bet.is_zero() {
        return Err(ContractError::InvalidConfig("min_bet must be positive".to_string()));
    }
    if msg.min_bet > msg.max_bet {
        return Err(ContractError::InvalidConfig(format!(
            "min_bet {} exceeds max_bet {}",
            msg.min_bet, msg.max_bet
        )));
    }
    validate_ratio("blackjack_payout", &msg.blackjack_payout)?;
    validate_ratio("insurance_payout", &msg.insurance_payout)?;
    validate_ratio("standard_payout", &msg.standard_payout)?;

    let owner = match msg.owner {
        Some(owner) => deps.api.addr_validate(&owner)?,
        None => info.sender.clone(),
    };

    // Funds sent along seed the bankroll
    let seed = if info.funds.is_empty() {
        Uint128::zero()
    } else {
        paid_amount(&info, &msg.denom)?
    };

    let config = Config {
        owner,
        denom: msg.denom,
        min_bet: msg.min_bet,
        max_bet: msg.max_bet,
        blackjack_payout: msg.blackjack_payout,
        insurance_payout: msg.insurance_payout,
        standard_payout: msg.standard_payout,
        dealer_hits_soft_17: msg.dealer_hits_soft_17,
    };
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    CONFIG.save(deps.storage, &config)?;
    HOUSE_BANKROLL.save(deps.storage, &seed)?;
    DRAW_NONCE.save(deps.storage, &0)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("denom", config.denom)
        .add_attribute("min_bet", config.min_bet)
        .add_attribute("max_bet", config.max_bet)
        .add_attribute("bankroll", seed))
}

fn validate_ratio(name: &str, ratio: &PayoutRatio) -> Result<(), ContractError> {
    blackjack::PayoutRatio::new(ratio.numerator, ratio.denominator)
        .map(|_| ())
        .map_err(|e| ContractError::InvalidConfig(format!("{name}: {e}")))
}

use cosmwasm_std::{ConversionOverflowError, OverflowError, StdError, Uint128};
use thiserror::Error;

use crate::state::{GameState, HandId};

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("{0}")]
    Conversion(#[from] ConversionOverflowError),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("only the owner may withdraw")]
    Unauthorized,

    #[error("cannot place bet: a game is already in progress")]
    GameInProgress,

    #[error("cannot reset game in an active playing state")]
    ActivePlayingState,

    #[error("cannot {action}: game is in state {state}")]
    InvalidState {
        action: &'static str,
        state: GameState,
    },

    #[error("bet too low: minimum is {min}")]
    BetTooLow { min: Uint128 },

    #[error("bet too high: maximum is {max}")]
    BetTooHigh { max: Uint128 },

    #[error("no {denom} funds sent")]
    NoFunds { denom: String },

    #[error("unexpected denom {denom}")]
    UnexpectedDenom { denom: String },

    #[error("this action does not accept funds")]
    NonPayable,

    #[error("{action} requires a stake of exactly {expected}, got {received}")]
    StakeMismatch {
        action: &'static str,
        expected: Uint128,
        received: Uint128,
    },

    #[error("hand {hand} does not exist: no split has been made")]
    NoSecondHand { hand: HandId },

    #[error("hand {hand} is not playable until the first hand is finished")]
    FirstHandPending { hand: HandId },

    #[error("hand {hand} is already finished")]
    HandFinished { hand: HandId },

    #[error("cannot double down: hand {hand} must hold exactly two cards")]
    CannotDouble { hand: HandId },

    #[error("cannot split: {reason}")]
    CannotSplit { reason: &'static str },

    #[error("cannot take insurance: {reason}")]
    CannotInsure { reason: &'static str },

    #[error("hit count must be between 1 and {max}")]
    InvalidHitCount { max: u8 },

    #[error("insufficient bankroll: required {required}, available {available}")]
    InsufficientBankroll {
        required: Uint128,
        available: Uint128,
    },

    #[error("nothing to withdraw")]
    NothingToWithdraw,

    #[error("settlement would pay {payout} from a pot of {pot}")]
    Conservation { payout: Uint128, pot: Uint128 },

    #[error("card source produced invalid rank {rank}")]
    InvalidCard { rank: u8 },
}

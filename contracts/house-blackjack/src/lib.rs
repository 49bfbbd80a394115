pub mod contract;
pub mod entropy;
pub mod error;
pub mod events;
pub mod game_logic;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;

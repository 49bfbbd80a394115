use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;

pub use crate::state::{Config, GameState, HandId, HandSettlement, PayoutRatio};

#[cw_serde]
pub struct InstantiateMsg {
    /// Address allowed to withdraw the bankroll. Defaults to the instantiator.
    pub owner: Option<String>,
    pub denom: String,
    pub min_bet: Uint128,
    pub max_bet: Uint128,
    pub blackjack_payout: PayoutRatio,
    pub insurance_payout: PayoutRatio,
    pub standard_payout: PayoutRatio,
    pub dealer_hits_soft_17: bool,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Open a round; the attached funds are the bet
    PlaceBet {},
    DealInitialCards {},
    Hit { hand: HandId },
    /// Draw up to `count` cards, stopping early once the hand is finished
    HitMultiple { hand: HandId, count: u8 },
    Stand { hand: HandId },
    /// Attach a stake equal to the hand's bet
    DoubleDown { hand: HandId },
    /// Attach a stake equal to the first hand's bet
    Split {},
    /// Attach half the original bet, rounded down
    TakeInsurance {},
    ResetGame {},
    FundBankroll {},
    WithdrawAll {},
}

#[cw_serde]
pub enum Seat {
    Player,
    Dealer,
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    GetConfig {},
    #[returns(GameResponse)]
    GetGame { player: String },
    #[returns(GameStateResponse)]
    GetGameState { player: String },
    #[returns(HandResponse)]
    GetPlayerHand { player: String },
    #[returns(HandResponse)]
    GetPlayerHand2 { player: String },
    #[returns(HandResponse)]
    GetDealerHand { player: String },
    /// Value of the player's first hand or of the dealer's hand
    #[returns(HandValueResponse)]
    GetHandValue { player: String, seat: Seat },
    #[returns(HandValueResponse)]
    GetHand2Value { player: String },
    #[returns(BankrollResponse)]
    GetBankroll {},
}

#[cw_serde]
pub struct GameResponse {
    pub player: String,
    pub state: GameState,
    pub bet: Uint128,
    pub bet2: Uint128,
    pub hand1: HandResponse,
    pub hand2: HandResponse,
    pub dealer_hand: HandResponse,
    pub has_split: bool,
    pub hand1_done: bool,
    pub hand2_done: bool,
    pub hand1_doubled: bool,
    pub hand2_doubled: bool,
    pub insurance_taken: bool,
    pub dealer_has_ace: bool,
    pub insurance_bet: Uint128,
    pub reserved: Uint128,
    pub results: Vec<HandSettlement>,
}

#[cw_serde]
pub struct HandResponse {
    pub cards: Vec<u8>,
    pub value: u8,
}

#[cw_serde]
pub struct HandValueResponse {
    pub value: u8,
}

#[cw_serde]
pub struct GameStateResponse {
    pub state: GameState,
}

#[cw_serde]
pub struct BankrollResponse {
    pub balance: Uint128,
}

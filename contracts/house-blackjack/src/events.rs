use cosmwasm_std::{Addr, Event, Uint128};

use crate::state::HandId;

/// Every state transition observers can subscribe to.
///
/// Each one is published as a `wasm-<kind>` event tagged with the player it
/// concerns, so indexers can follow a single table without reading storage.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    GameStarted { bet: Uint128 },
    PlayerCardDealt { hand: HandId, card: u8 },
    DealerCardDealt { card: u8 },
    PlayerStood { hand: HandId },
    PlayerBust { hand: HandId, value: u8 },
    DealerBust { value: u8 },
    GameResult { hand: HandId, outcome: String, payout: Uint128 },
    InsuranceResult { dealer_blackjack: bool, payout: Uint128 },
    InsuranceTaken { amount: Uint128 },
    DoubleDown { hand: HandId, new_bet: Uint128 },
    Split { bet: Uint128 },
    GameReset { refund: Uint128 },
    BankrollFunded { amount: Uint128 },
    BankrollWithdrawn { amount: Uint128 },
}

impl Notification {
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::GameStarted { .. } => "game_started",
            Notification::PlayerCardDealt { .. } => "player_card_dealt",
            Notification::DealerCardDealt { .. } => "dealer_card_dealt",
            Notification::PlayerStood { .. } => "player_stood",
            Notification::PlayerBust { .. } => "player_bust",
            Notification::DealerBust { .. } => "dealer_bust",
            Notification::GameResult { .. } => "game_result",
            Notification::InsuranceResult { .. } => "insurance_result",
            Notification::InsuranceTaken { .. } => "insurance_taken",
            Notification::DoubleDown { .. } => "double_down",
            Notification::Split { .. } => "split",
            Notification::GameReset { .. } => "game_reset",
            Notification::BankrollFunded { .. } => "bankroll_funded",
            Notification::BankrollWithdrawn { .. } => "bankroll_withdrawn",
        }
    }

    pub fn into_event(self, player: &Addr) -> Event {
        let event = Event::new(self.kind()).add_attribute("player", player.as_str());
        match self {
            Notification::GameStarted { bet } => event.add_attribute("bet", bet),
            Notification::PlayerCardDealt { hand, card } => event
                .add_attribute("hand", hand.to_string())
                .add_attribute("card", card.to_string()),
            Notification::DealerCardDealt { card } => event.add_attribute("card", card.to_string()),
            Notification::PlayerStood { hand } => event.add_attribute("hand", hand.to_string()),
            Notification::PlayerBust { hand, value } => event
                .add_attribute("hand", hand.to_string())
                .add_attribute("value", value.to_string()),
            Notification::DealerBust { value } => event.add_attribute("value", value.to_string()),
            Notification::GameResult {
                hand,
                outcome,
                payout,
            } => event
                .add_attribute("hand", hand.to_string())
                .add_attribute("outcome", outcome)
                .add_attribute("payout", payout),
            Notification::InsuranceResult {
                dealer_blackjack,
                payout,
            } => event
                .add_attribute("dealer_blackjack", dealer_blackjack.to_string())
                .add_attribute("payout", payout),
            Notification::InsuranceTaken { amount } => event.add_attribute("amount", amount),
            Notification::DoubleDown { hand, new_bet } => event
                .add_attribute("hand", hand.to_string())
                .add_attribute("new_bet", new_bet),
            Notification::Split { bet } => event.add_attribute("bet", bet),
            Notification::GameReset { refund } => event.add_attribute("refund", refund),
            Notification::BankrollFunded { amount } => event.add_attribute("amount", amount),
            Notification::BankrollWithdrawn { amount } => event.add_attribute("amount", amount),
        }
    }
}

/// Collects notifications raised while one message executes.
#[derive(Debug)]
pub struct Notifier {
    player: Addr,
    pending: Vec<Notification>,
}

impl Notifier {
    pub fn new(player: Addr) -> Self {
        Self {
            player,
            pending: vec![],
        }
    }

    pub fn emit(&mut self, notification: Notification) {
        self.pending.push(notification);
    }

    pub fn into_events(self) -> Vec<Event> {
        let player = self.player;
        self.pending
            .into_iter()
            .map(|n| n.into_event(&player))
            .collect()
    }
}

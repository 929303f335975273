use crate::model::card::Card;
use crate::model::state::{GameState, RemainingCounts};
use serde::{Deserialize, Serialize};

/// Serializable copy of a [`GameState`] used to pin replay fixtures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StateSnapshot {
    pub cards_left: usize,
    pub alive_bots: usize,
    pub last_card_was_elimination: bool,
    pub remaining: RemainingCounts,
    #[serde(default)]
    pub played_history: Vec<Card>,
}

impl StateSnapshot {
    pub fn capture(state: &GameState) -> Self {
        StateSnapshot {
            cards_left: state.cards_left(),
            alive_bots: state.alive_bots(),
            last_card_was_elimination: state.last_card_was_elimination(),
            remaining: *state.remaining(),
            played_history: state.played_history().to_vec(),
        }
    }

    pub fn restore(self) -> GameState {
        GameState::new(self.cards_left, self.alive_bots)
            .with_last_card_elimination(self.last_card_was_elimination)
            .with_remaining(self.remaining)
            .with_history(self.played_history)
    }

    pub fn to_json(state: &GameState) -> serde_json::Result<String> {
        let snapshot = Self::capture(state);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

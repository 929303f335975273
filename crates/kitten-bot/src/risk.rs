use kitten_core::model::card::CardType;
use kitten_core::model::state::GameState;
use serde::{Deserialize, Serialize};

pub const DEFAULT_RISK_THRESHOLD: f64 = 0.2;

/// Piles at or below `max(SMALL_PILE_FLOOR, alive_bots)` are always dangerous.
pub const SMALL_PILE_FLOOR: usize = 3;

/// Named danger models. `Naive` ignores the draw probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum RiskModel {
    Naive,
    Statistical {
        #[serde(default = "default_threshold")]
        threshold: f64,
    },
}

fn default_threshold() -> f64 {
    DEFAULT_RISK_THRESHOLD
}

impl RiskModel {
    pub const fn statistical() -> Self {
        RiskModel::Statistical {
            threshold: DEFAULT_RISK_THRESHOLD,
        }
    }

    /// Model named in config text; a statistical model takes `threshold`
    /// when one is given.
    pub fn parse(raw: &str, threshold: Option<f64>) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "naive" => Some(RiskModel::Naive),
            "statistical" => Some(RiskModel::Statistical {
                threshold: threshold.unwrap_or(DEFAULT_RISK_THRESHOLD),
            }),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            RiskModel::Naive => "naive",
            RiskModel::Statistical { .. } => "statistical",
        }
    }
}

impl Default for RiskModel {
    fn default() -> Self {
        Self::statistical()
    }
}

/// First condition that made the state dangerous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DangerTrigger {
    Calm,
    LastCardElimination,
    SmallPile,
    Probability,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskSignal {
    pub dangerous: bool,
    pub probability: f64,
    pub trigger: DangerTrigger,
}

/// Stateless danger estimate over a [`GameState`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RiskAssessor {
    model: RiskModel,
}

impl RiskAssessor {
    pub const fn new(model: RiskModel) -> Self {
        Self { model }
    }

    pub const fn naive() -> Self {
        Self::new(RiskModel::Naive)
    }

    pub const fn statistical() -> Self {
        Self::new(RiskModel::statistical())
    }

    pub const fn model(&self) -> RiskModel {
        self.model
    }

    /// Chance that the next draw is an elimination card; 0 for an empty pile.
    pub fn elimination_probability(state: &GameState) -> f64 {
        let cards_left = state.cards_left();
        if cards_left == 0 {
            return 0.0;
        }
        state.remaining_of(CardType::Elimination) as f64 / cards_left as f64
    }

    pub fn assess(&self, state: &GameState) -> RiskSignal {
        let probability = Self::elimination_probability(state);
        let trigger = if state.last_card_was_elimination() {
            DangerTrigger::LastCardElimination
        } else if state.cards_left() <= SMALL_PILE_FLOOR.max(state.alive_bots()) {
            DangerTrigger::SmallPile
        } else {
            match self.model {
                RiskModel::Statistical { threshold } if probability > threshold => {
                    DangerTrigger::Probability
                }
                _ => DangerTrigger::Calm,
            }
        };
        RiskSignal {
            dangerous: trigger != DangerTrigger::Calm,
            probability,
            trigger,
        }
    }

    pub fn is_dangerous(&self, state: &GameState) -> bool {
        self.assess(state).dangerous
    }
}

/// Counts derived from the public discard history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryDigest {
    pub eliminations_played: usize,
    pub skips_played: usize,
    pub defuses_played: usize,
    pub shuffles_played: usize,
    pub defuses_exhausted: bool,
}

impl HistoryDigest {
    pub fn from_state(state: &GameState) -> Self {
        let mut digest = Self::default();
        for card in state.played_history() {
            match card.kind {
                CardType::Elimination => digest.eliminations_played += 1,
                CardType::Skip => digest.skips_played += 1,
                CardType::Defuse => digest.defuses_played += 1,
                CardType::Shuffle => digest.shuffles_played += 1,
                _ => {}
            }
        }
        digest.defuses_exhausted = digest.defuses_played >= state.alive_bots();
        digest
    }
}

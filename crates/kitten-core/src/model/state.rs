use crate::model::card::{Card, CardType};
use serde::{Deserialize, Serialize};

/// Count of each card kind still in the draw pile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainingCounts {
    counts: [usize; CardType::COUNT],
}

impl RemainingCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: &[Card]) -> Self {
        let mut counts = Self::new();
        for card in cards {
            counts.counts[card.kind.index()] += 1;
        }
        counts
    }

    pub fn get(&self, kind: CardType) -> usize {
        self.counts[kind.index()]
    }

    pub fn set(&mut self, kind: CardType, count: usize) {
        self.counts[kind.index()] = count;
    }

    pub fn with(mut self, kind: CardType, count: usize) -> Self {
        self.set(kind, count);
        self
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Read-only view of the shared table, supplied by the engine before each
/// policy call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    cards_left: usize,
    alive_bots: usize,
    last_card_was_elimination: bool,
    remaining: RemainingCounts,
    played_history: Vec<Card>,
}

impl GameState {
    /// `alive_bots` is raised to 1 if the caller passes 0.
    pub fn new(cards_left: usize, alive_bots: usize) -> Self {
        Self {
            cards_left,
            alive_bots: alive_bots.max(1),
            last_card_was_elimination: false,
            remaining: RemainingCounts::new(),
            played_history: Vec::new(),
        }
    }

    /// Build a snapshot from the literal draw pile, top first.
    pub fn from_pile(pile: &[Card], alive_bots: usize) -> Self {
        Self::new(pile.len(), alive_bots).with_remaining(RemainingCounts::from_cards(pile))
    }

    pub fn with_last_card_elimination(mut self, value: bool) -> Self {
        self.last_card_was_elimination = value;
        self
    }

    pub fn with_remaining(mut self, remaining: RemainingCounts) -> Self {
        self.remaining = remaining;
        self
    }

    pub fn with_history(mut self, history: Vec<Card>) -> Self {
        self.played_history = history;
        self
    }

    pub fn cards_left(&self) -> usize {
        self.cards_left
    }

    pub fn alive_bots(&self) -> usize {
        self.alive_bots
    }

    pub fn last_card_was_elimination(&self) -> bool {
        self.last_card_was_elimination
    }

    pub fn remaining(&self) -> &RemainingCounts {
        &self.remaining
    }

    pub fn remaining_of(&self, kind: CardType) -> usize {
        self.remaining.get(kind)
    }

    pub fn played_history(&self) -> &[Card] {
        &self.played_history
    }

    pub fn record_play(&mut self, card: Card) {
        self.played_history.push(card);
    }
}

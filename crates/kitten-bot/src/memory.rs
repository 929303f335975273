use crate::foresight::{ForesightTracker, InvalidationCause, SyncOutcome};
use kitten_core::model::card::{Card, CardType};
use kitten_core::model::state::GameState;

/// Per-bot state carried across calls for the length of one game.
///
/// The hand is deliberately absent: it belongs to the engine and arrives
/// with every call.
#[derive(Debug, Clone, Default)]
pub struct BotMemory {
    turn_counter: u32,
    last_foresight_turn: Option<u32>,
    plays_this_turn: u32,
    turn_open: bool,
    last_drawn: Option<Card>,
    checkpoint: Option<TableCheckpoint>,
    foresight: ForesightTracker,
}

/// What the table should look like at our next call if nobody else acted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TableCheckpoint {
    cards_left: usize,
    history_len: usize,
}

impl TableCheckpoint {
    /// A smaller pile or history beyond our own plays means other seats
    /// have moved since our last call.
    fn table_moved_on(&self, state: &GameState) -> bool {
        state.cards_left() < self.cards_left || state.played_history().len() > self.history_len
    }
}

impl BotMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry bookkeeping for `play`. The first call of a turn advances the
    /// counter before anything else is decided.
    ///
    /// A turn starts when the last one was closed by our own return value, or
    /// when the table moved on while it still looked open. The latter covers
    /// engines that stop calling `play` once a hand runs out of cards.
    pub fn begin_play(&mut self, state: &GameState) -> SyncOutcome {
        let moved_on = self
            .checkpoint
            .is_some_and(|checkpoint| checkpoint.table_moved_on(state));
        let turn_start = !self.turn_open || moved_on;
        if turn_start {
            self.turn_counter += 1;
            self.turn_open = true;
            self.plays_this_turn = 0;
            self.last_drawn = None;
        }
        self.foresight.sync(state, turn_start)
    }

    /// Reconcile before placing a card we just defused; our own defuse may
    /// already sit in the history.
    pub fn sync_for_placement(&mut self, state: &GameState) -> SyncOutcome {
        self.foresight.sync_with(state, false, 1)
    }

    /// The card is about to be played onto `state`; the engine may or may not
    /// append it to the history before the next call.
    pub fn record_play(&mut self, card: Card, state: &GameState) {
        self.checkpoint = Some(TableCheckpoint {
            cards_left: state.cards_left(),
            history_len: state.played_history().len() + 1,
        });
        self.plays_this_turn += 1;
        if card.is(CardType::SeeTheFuture) {
            self.last_foresight_turn = Some(self.turn_counter);
        }
        if card.kind.ends_turn() {
            self.turn_open = false;
        }
    }

    /// The bot passes on playing and draws; closes the turn.
    pub fn record_draw(&mut self) -> Option<Card> {
        self.turn_open = false;
        self.checkpoint = None;
        self.last_drawn = self.foresight.consume_front();
        self.last_drawn
    }

    pub fn record_reveal(&mut self, top: &[Card], state: &GameState) {
        self.foresight.reveal(top, state);
        self.last_foresight_turn = Some(self.turn_counter);
        self.plays_this_turn = 0;
    }

    /// Our own placement; the card is known when the draw came off the
    /// foresight window. Placing follows a draw, so the turn is over.
    pub fn record_placement(&mut self, depth: usize) {
        self.turn_open = false;
        self.checkpoint = None;
        let card = self.last_drawn.take().filter(|card| card.is_elimination());
        self.foresight.record_insertion(depth, card);
    }

    pub fn invalidate_foresight(&mut self) -> bool {
        self.foresight.invalidate(InvalidationCause::External)
    }

    pub fn foresight_due(&self, cooldown: u32) -> bool {
        match self.last_foresight_turn {
            None => true,
            Some(last) => self.turn_counter.saturating_sub(last) > cooldown,
        }
    }

    pub fn foresight_used_this_turn(&self) -> bool {
        self.last_foresight_turn == Some(self.turn_counter)
    }

    pub fn turn_counter(&self) -> u32 {
        self.turn_counter
    }

    pub fn last_foresight_turn(&self) -> Option<u32> {
        self.last_foresight_turn
    }

    pub fn plays_this_turn(&self) -> u32 {
        self.plays_this_turn
    }

    pub fn played_this_turn(&self) -> bool {
        self.plays_this_turn > 0
    }

    pub fn is_turn_open(&self) -> bool {
        self.turn_open
    }

    pub fn foresight(&self) -> &ForesightTracker {
        &self.foresight
    }
}

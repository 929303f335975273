use kitten_core::model::card::{Card, CardType};
use kitten_core::model::state::GameState;
use std::collections::VecDeque;
use tracing::{Level, event};

/// Why the tracker changed while reconciling with a fresh state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Unchanged,
    /// Opponents drew this many known cards off the top.
    Advanced(usize),
    Invalidated(InvalidationCause),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidationCause {
    ShufflePlayed,
    OpponentReinserted,
    UnexpectedGrowth,
    HistoryRewound,
    External,
}

/// Known upcoming cards, front = next draw.
///
/// Entries stay valid only while every change to the pile is accounted for:
/// our own draws and placements are recorded directly, opponents' draws are
/// inferred from the shrinking pile, anything else clears the queue.
#[derive(Debug, Clone, Default)]
pub struct ForesightTracker {
    queue: VecDeque<Card>,
    expected_cards_left: usize,
    history_seen: usize,
}

impl ForesightTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reveal(&mut self, top: &[Card], state: &GameState) {
        self.queue = top.iter().copied().collect();
        self.expected_cards_left = state.cards_left();
        self.history_seen = state.played_history().len();
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn front(&self) -> Option<Card> {
        self.queue.front().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.queue.iter()
    }

    pub fn known_eliminations(&self) -> usize {
        self.queue.iter().filter(|card| card.is_elimination()).count()
    }

    /// We are about to draw the top card.
    pub fn consume_front(&mut self) -> Option<Card> {
        let drawn = self.queue.pop_front();
        if drawn.is_some() {
            self.expected_cards_left = self.expected_cards_left.saturating_sub(1);
        }
        drawn
    }

    /// First depth whose known card is not an elimination card, or the end of
    /// the known window.
    pub fn safe_slot(&self) -> usize {
        self.queue
            .iter()
            .position(|card| !card.is_elimination())
            .unwrap_or(self.queue.len())
    }

    /// We put a card back at `depth`. An unknown card truncates the window at
    /// that depth.
    pub fn record_insertion(&mut self, depth: usize, card: Option<Card>) {
        if self.queue.is_empty() {
            return;
        }
        self.expected_cards_left += 1;
        if depth > self.queue.len() {
            return;
        }
        match card {
            Some(card) => self.queue.insert(depth, card),
            None => self.queue.truncate(depth),
        }
    }

    pub fn invalidate(&mut self, cause: InvalidationCause) -> bool {
        if self.queue.is_empty() {
            return false;
        }
        event!(
            target: "kitten_bot::foresight",
            Level::DEBUG,
            cause = ?cause,
            dropped = self.queue.len(),
            "foresight invalidated"
        );
        self.queue.clear();
        true
    }

    /// Reconcile with the live state before deciding anything.
    pub fn sync(&mut self, state: &GameState, turn_start: bool) -> SyncOutcome {
        self.sync_with(state, turn_start, 0)
    }

    /// Like [`sync`](Self::sync), tolerating `own_defuses` defuse plays in
    /// the history that were ours.
    pub fn sync_with(
        &mut self,
        state: &GameState,
        turn_start: bool,
        own_defuses: usize,
    ) -> SyncOutcome {
        if self.queue.is_empty() {
            self.history_seen = state.played_history().len();
            return SyncOutcome::Unchanged;
        }

        let history = state.played_history();
        let fresh = history.get(self.history_seen..).unwrap_or_default();
        let defuses = fresh.iter().filter(|card| card.is(CardType::Defuse)).count();
        let cause = if history.len() < self.history_seen {
            Some(InvalidationCause::HistoryRewound)
        } else if fresh.iter().any(|card| card.kind.reorders_pile()) {
            Some(InvalidationCause::ShufflePlayed)
        } else if defuses > own_defuses {
            Some(InvalidationCause::OpponentReinserted)
        } else if turn_start && state.last_card_was_elimination() {
            Some(InvalidationCause::OpponentReinserted)
        } else if state.cards_left() > self.expected_cards_left {
            Some(InvalidationCause::UnexpectedGrowth)
        } else {
            None
        };
        self.history_seen = history.len();

        if let Some(cause) = cause {
            self.invalidate(cause);
            return SyncOutcome::Invalidated(cause);
        }

        let drawn = self.expected_cards_left - state.cards_left();
        if drawn == 0 {
            return SyncOutcome::Unchanged;
        }
        let dropped = drawn.min(self.queue.len());
        self.queue.drain(..dropped);
        self.expected_cards_left = state.cards_left();
        SyncOutcome::Advanced(drawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: u16, kind: CardType) -> Card {
        Card::new(id, kind)
    }

    fn revealed(top: &[Card], cards_left: usize) -> (ForesightTracker, GameState) {
        let state = GameState::new(cards_left, 3);
        let mut tracker = ForesightTracker::new();
        tracker.reveal(top, &state);
        (tracker, state)
    }

    #[test]
    fn reveal_replaces_queue() {
        let (mut tracker, state) = revealed(&[card(1, CardType::Normal)], 10);
        tracker.reveal(
            &[card(2, CardType::Elimination), card(3, CardType::Skip)],
            &state,
        );
        assert_eq!(tracker.len(), 2);
        assert_eq!(tracker.front(), Some(card(2, CardType::Elimination)));
        assert_eq!(tracker.known_eliminations(), 1);
    }

    #[test]
    fn opponent_draws_advance_the_window() {
        let top = [
            card(1, CardType::Normal),
            card(2, CardType::Elimination),
            card(3, CardType::Skip),
        ];
        let (mut tracker, _) = revealed(&top, 10);
        let later = GameState::new(8, 3);
        assert_eq!(tracker.sync(&later, true), SyncOutcome::Advanced(2));
        assert_eq!(tracker.front(), Some(card(3, CardType::Skip)));
        assert_eq!(tracker.sync(&later, false), SyncOutcome::Unchanged);
    }

    #[test]
    fn draws_past_window_empty_it() {
        let (mut tracker, _) = revealed(&[card(1, CardType::Normal)], 10);
        assert_eq!(
            tracker.sync(&GameState::new(5, 3), true),
            SyncOutcome::Advanced(5)
        );
        assert!(tracker.is_empty());
    }

    #[test]
    fn shuffle_in_history_invalidates() {
        let (mut tracker, _) = revealed(&[card(1, CardType::Normal)], 10);
        let later = GameState::new(10, 3).with_history(vec![card(9, CardType::Shuffle)]);
        assert_eq!(
            tracker.sync(&later, false),
            SyncOutcome::Invalidated(InvalidationCause::ShufflePlayed)
        );
        assert!(tracker.is_empty());
    }

    #[test]
    fn shuffle_before_reveal_is_ignored() {
        let state = GameState::new(10, 3).with_history(vec![card(9, CardType::Shuffle)]);
        let mut tracker = ForesightTracker::new();
        tracker.reveal(&[card(1, CardType::Normal)], &state);
        assert_eq!(tracker.sync(&state, false), SyncOutcome::Unchanged);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn reinsertion_by_opponent_invalidates_at_turn_start_only() {
        let (mut tracker, _) = revealed(&[card(1, CardType::Normal)], 10);
        let flagged = GameState::new(10, 3).with_last_card_elimination(true);
        assert_eq!(tracker.sync(&flagged, false), SyncOutcome::Unchanged);
        assert_eq!(
            tracker.sync(&flagged, true),
            SyncOutcome::Invalidated(InvalidationCause::OpponentReinserted)
        );
    }

    #[test]
    fn opponent_defuse_in_history_invalidates() {
        let (mut tracker, _) = revealed(&[card(1, CardType::Normal)], 10);
        let later = GameState::new(9, 3).with_history(vec![card(50, CardType::Defuse)]);
        assert_eq!(
            tracker.sync(&later, false),
            SyncOutcome::Invalidated(InvalidationCause::OpponentReinserted)
        );
    }

    #[test]
    fn own_defuse_is_tolerated() {
        let top = [card(1, CardType::Elimination), card(2, CardType::Normal)];
        let (mut tracker, _) = revealed(&top, 10);
        tracker.consume_front();
        let after = GameState::new(9, 3).with_history(vec![card(50, CardType::Defuse)]);
        assert_eq!(tracker.sync_with(&after, false, 1), SyncOutcome::Unchanged);
        assert_eq!(tracker.len(), 1);
        // Already accounted for on later syncs.
        assert_eq!(tracker.sync(&after, true), SyncOutcome::Unchanged);
    }

    #[test]
    fn unexpected_growth_invalidates() {
        let (mut tracker, _) = revealed(&[card(1, CardType::Normal)], 10);
        assert_eq!(
            tracker.sync(&GameState::new(11, 3), false),
            SyncOutcome::Invalidated(InvalidationCause::UnexpectedGrowth)
        );
    }

    #[test]
    fn own_draw_and_placement_keep_window_consistent() {
        let top = [
            card(1, CardType::Elimination),
            card(2, CardType::Normal),
            card(3, CardType::Skip),
        ];
        let (mut tracker, _) = revealed(&top, 10);
        assert_eq!(tracker.consume_front(), Some(card(1, CardType::Elimination)));
        assert_eq!(tracker.safe_slot(), 0);
        tracker.record_insertion(0, Some(card(1, CardType::Elimination)));
        assert_eq!(tracker.len(), 3);
        assert_eq!(tracker.sync(&GameState::new(10, 3), false), SyncOutcome::Unchanged);
    }

    #[test]
    fn unknown_insertion_truncates() {
        let top = [
            card(1, CardType::Normal),
            card(2, CardType::Normal),
            card(3, CardType::Normal),
        ];
        let (mut tracker, _) = revealed(&top, 10);
        tracker.record_insertion(1, None);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn safe_slot_skips_known_eliminations() {
        let top = [
            card(1, CardType::Elimination),
            card(2, CardType::Elimination),
            card(3, CardType::Normal),
        ];
        let (tracker, _) = revealed(&top, 10);
        assert_eq!(tracker.safe_slot(), 2);
        let (tracker, _) = revealed(&top[..2], 10);
        assert_eq!(tracker.safe_slot(), 2);
    }

    #[test]
    fn invalidate_reports_whether_anything_was_known() {
        let mut tracker = ForesightTracker::new();
        assert!(!tracker.invalidate(InvalidationCause::External));
        tracker.reveal(&[card(1, CardType::Normal)], &GameState::new(4, 2));
        assert!(tracker.invalidate(InvalidationCause::External));
        assert!(tracker.is_empty());
    }
}

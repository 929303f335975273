use crate::foresight::ForesightTracker;
use kitten_core::model::state::GameState;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementReason {
    /// First known slot that does not stack on another elimination card.
    ForesightGap,
    /// Even share of the pile per alive bot.
    Spread,
    Random,
    EmptyPile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub depth: usize,
    pub reason: PlacementReason,
}

/// Valid depths are `0..cards_left`; an empty pile only admits 0.
pub fn clamp_depth(depth: usize, cards_left: usize) -> usize {
    depth.min(cards_left.saturating_sub(1))
}

/// Pick a reinsertion depth for a neutralized elimination card, counted from
/// the top of the pile.
pub fn choose_depth<R: Rng + ?Sized>(
    state: &GameState,
    foresight: Option<&ForesightTracker>,
    rng: &mut R,
) -> Placement {
    let cards_left = state.cards_left();
    let alive_bots = state.alive_bots();

    let (depth, reason) = match foresight.filter(|tracker| !tracker.is_empty()) {
        Some(tracker) => (tracker.safe_slot(), PlacementReason::ForesightGap),
        None if cards_left == 0 => (0, PlacementReason::EmptyPile),
        None if cards_left > alive_bots => (cards_left / alive_bots, PlacementReason::Spread),
        None => (rng.gen_range(0..cards_left), PlacementReason::Random),
    };

    Placement {
        depth: clamp_depth(depth, cards_left),
        reason,
    }
}

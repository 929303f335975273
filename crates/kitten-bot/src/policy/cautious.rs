use super::{Policy, PolicyContext, PolicyCore};
use crate::memory::BotMemory;
use crate::risk::{RiskAssessor, RiskModel};
use kitten_core::model::card::{Card, CardType};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Simplest ladder: look ahead once per turn, skip when the table looks
/// dangerous, otherwise stall. Placement ignores foresight.
#[derive(Debug)]
pub struct CautiousPolicy<R = StdRng> {
    core: PolicyCore<R>,
}

impl CautiousPolicy<StdRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> CautiousPolicy<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            core: PolicyCore::new("cautious", rng, RiskModel::Naive),
        }
    }

    pub fn with_risk(mut self, model: RiskModel) -> Self {
        self.core.risk = RiskAssessor::new(model);
        self
    }
}

impl<R: Rng + Send> Policy for CautiousPolicy<R> {
    fn name(&self) -> &'static str {
        self.core.name
    }

    fn play(&mut self, ctx: &PolicyContext) -> Option<Card> {
        self.core.begin_play(ctx);
        let hand = ctx.hand;

        if !self.core.memory.foresight_used_this_turn() {
            if let Some(card) = hand.first_of(CardType::SeeTheFuture) {
                return self.core.play_card(ctx, card, "look_ahead", None);
            }
        }

        let imminent = self
            .core
            .memory
            .foresight()
            .front()
            .is_some_and(|card| card.is_elimination());
        if imminent {
            if let Some(skip) = hand.first_of(CardType::Skip) {
                return self.core.play_card(ctx, skip, "dodge_known_elimination", None);
            }
        }

        let signal = self.core.risk.assess(ctx.state);
        if signal.dangerous {
            if let Some(skip) = self.core.pick_random(hand, CardType::Skip) {
                return self.core.play_card(ctx, skip, "skip_on_danger", Some(&signal));
            }
        }

        if let Some(normal) = self.core.pick_random(hand, CardType::Normal) {
            return self.core.play_card(ctx, normal, "stall", Some(&signal));
        }

        self.core.draw(ctx, "no_option", Some(&signal))
    }

    fn handle_elimination_card(&mut self, ctx: &PolicyContext) -> usize {
        self.core.place(ctx, false)
    }

    fn on_foresight_revealed(&mut self, ctx: &PolicyContext, top: &[Card]) {
        self.core.reveal(ctx, top);
    }

    fn on_deck_shuffled(&mut self) {
        self.core.memory.invalidate_foresight();
    }

    fn memory(&self) -> &BotMemory {
        &self.core.memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::test_support::{hand_of, top};
    use kitten_core::model::card::CardType::*;
    use kitten_core::model::state::{GameState, RemainingCounts};

    #[test]
    fn looks_ahead_once_per_turn() {
        let mut policy = CautiousPolicy::from_seed(1);
        let state = GameState::new(30, 3);
        let hand = hand_of(&[SeeTheFuture, SeeTheFuture]);
        let ctx = PolicyContext::new(&state, &hand);
        assert_eq!(policy.play(&ctx).map(|card| card.kind), Some(SeeTheFuture));
        policy.on_foresight_revealed(&ctx, &top(&[Normal, Normal, Normal]));
        assert_eq!(policy.play(&ctx), None);
        // Next turn it looks again, no cooldown.
        assert_eq!(policy.play(&ctx).map(|card| card.kind), Some(SeeTheFuture));
        assert_eq!(policy.memory().turn_counter(), 2);
    }

    #[test]
    fn imminent_elimination_is_skipped() {
        let mut policy = CautiousPolicy::from_seed(2);
        let state = GameState::new(30, 3);
        let hand = hand_of(&[Skip, Normal]);
        let ctx = PolicyContext::new(&state, &hand);
        policy.on_foresight_revealed(&ctx, &top(&[Elimination]));
        assert_eq!(policy.play(&ctx).map(|card| card.kind), Some(Skip));
    }

    #[test]
    fn ignores_probability_by_default() {
        let mut policy = CautiousPolicy::from_seed(3);
        let state = GameState::new(5, 2).with_remaining(RemainingCounts::new().with(Elimination, 2));
        let hand = hand_of(&[Skip, Normal]);
        let chosen = policy.play(&PolicyContext::new(&state, &hand));
        assert_eq!(chosen.map(|card| card.kind), Some(Normal));
    }

    #[test]
    fn placement_ignores_foresight() {
        let mut policy = CautiousPolicy::from_seed(4);
        let state = GameState::new(10, 3);
        let hand = hand_of(&[]);
        let ctx = PolicyContext::new(&state, &hand);
        policy.on_foresight_revealed(&ctx, &top(&[Elimination, Normal, Normal]));
        assert_eq!(policy.handle_elimination_card(&ctx), 3);
    }
}

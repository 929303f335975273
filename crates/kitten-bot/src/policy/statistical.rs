use super::{Policy, PolicyContext, PolicyCore};
use crate::memory::BotMemory;
use crate::risk::{RiskAssessor, RiskModel};
use kitten_core::model::card::{Card, CardType};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Probability-driven ladder: foresight on cooldown, skip on danger, stall,
/// and only then consult the known top card.
#[derive(Debug)]
pub struct StatisticalPolicy<R = StdRng> {
    core: PolicyCore<R>,
}

impl StatisticalPolicy<StdRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> StatisticalPolicy<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            core: PolicyCore::new("statistical", rng, RiskModel::statistical()),
        }
    }

    pub fn with_risk(mut self, model: RiskModel) -> Self {
        self.core.risk = RiskAssessor::new(model);
        self
    }

    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.core.cooldown = cooldown;
        self
    }
}

impl<R: Rng + Send> Policy for StatisticalPolicy<R> {
    fn name(&self) -> &'static str {
        self.core.name
    }

    fn play(&mut self, ctx: &PolicyContext) -> Option<Card> {
        self.core.begin_play(ctx);
        let hand = ctx.hand;

        if let Some(card) = self.core.foresight_due(hand) {
            return self.core.play_card(ctx, card, "foresight_refresh", None);
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

        let known_bomb = self
            .core
            .memory
            .foresight()
            .front()
            .is_some_and(|card| card.is_elimination());
        if known_bomb {
            if let Some(skip) = hand.first_of(CardType::Skip) {
                return self.core.play_card(ctx, skip, "dodge_known_elimination", Some(&signal));
            }
        }

        self.core.draw(ctx, "no_option", Some(&signal))
    }

    fn handle_elimination_card(&mut self, ctx: &PolicyContext) -> usize {
        self.core.place(ctx, true)
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

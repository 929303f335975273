use super::{Policy, PolicyContext, PolicyCore};
use crate::memory::BotMemory;
use crate::risk::{RiskAssessor, RiskModel};
use kitten_core::model::card::{Card, CardType};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Full ladder: periodic foresight, act on the known top card, then react to
/// danger, stall, and finally draw.
#[derive(Debug)]
pub struct ForesightPolicy<R = StdRng> {
    core: PolicyCore<R>,
}

impl ForesightPolicy<StdRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ForesightPolicy<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            core: PolicyCore::new("foresight", rng, RiskModel::statistical()),
        }
    }

    pub fn with_risk(mut self, model: RiskModel) -> Self {
        self.core.risk = RiskAssessor::new(model);
        self
    }

    /// Turns that must pass after a foresight play before the next one.
    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.core.cooldown = cooldown;
        self
    }
}

impl<R: Rng + Send> Policy for ForesightPolicy<R> {
    fn name(&self) -> &'static str {
        self.core.name
    }

    fn play(&mut self, ctx: &PolicyContext) -> Option<Card> {
        self.core.begin_play(ctx);
        let hand = ctx.hand;

        if let Some(card) = self.core.foresight_due(hand) {
            return self.core.play_card(ctx, card, "foresight_refresh", None);
        }

        if let Some(next) = self.core.memory.foresight().front() {
            if !next.is_elimination() {
                return self.core.draw(ctx, "known_safe_draw", None);
            }
            if let Some(skip) = hand.first_of(CardType::Skip) {
                return self.core.play_card(ctx, skip, "dodge_known_elimination", None);
            }
            if hand.has(CardType::Defuse) {
                return self.core.draw(ctx, "defuse_known_elimination", None);
            }
            if let Some(normal) = self.core.pick_random(hand, CardType::Normal) {
                return self.core.play_card(ctx, normal, "stall_known_elimination", None);
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

        let reason = if hand.has(CardType::Defuse) {
            "hold_defuse"
        } else {
            "no_option"
        };
        self.core.draw(ctx, reason, Some(&signal))
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

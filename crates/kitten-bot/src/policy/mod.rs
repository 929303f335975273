mod cautious;
mod foresight;
mod statistical;

pub use cautious::CautiousPolicy;
pub use foresight::ForesightPolicy;
pub use statistical::StatisticalPolicy;

use crate::config::DEFAULT_FORESIGHT_COOLDOWN;
use crate::memory::BotMemory;
use crate::placement::{self, Placement};
use crate::risk::{HistoryDigest, RiskAssessor, RiskModel, RiskSignal};
use kitten_core::model::card::{Card, CardType};
use kitten_core::model::hand::Hand;
use kitten_core::model::state::GameState;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{Level, event};

/// Context provided to policies for every call.
#[derive(Debug, Clone, Copy)]
pub struct PolicyContext<'a> {
    pub state: &'a GameState,
    pub hand: &'a Hand,
}

impl<'a> PolicyContext<'a> {
    pub fn new(state: &'a GameState, hand: &'a Hand) -> Self {
        Self { state, hand }
    }
}

/// Capability every bot exposes to the engine.
pub trait Policy: Send {
    fn name(&self) -> &'static str;

    /// Card to play next, or `None` to end the turn by drawing. Called
    /// repeatedly within one turn.
    fn play(&mut self, ctx: &PolicyContext) -> Option<Card>;

    /// Depth from the top of the pile, in `0..cards_left` (0 on an empty
    /// pile), for the elimination card the bot just neutralized.
    fn handle_elimination_card(&mut self, ctx: &PolicyContext) -> usize;

    /// Top of the pile, next draw first, after the bot played foresight.
    fn on_foresight_revealed(&mut self, ctx: &PolicyContext, top: &[Card]);

    /// Someone else reordered the pile.
    fn on_deck_shuffled(&mut self);

    fn memory(&self) -> &BotMemory;
}

/// State and helpers shared by every ladder.
#[derive(Debug)]
struct PolicyCore<R> {
    name: &'static str,
    memory: BotMemory,
    risk: RiskAssessor,
    cooldown: u32,
    rng: R,
}

impl<R: Rng> PolicyCore<R> {
    fn new(name: &'static str, rng: R, risk: RiskModel) -> Self {
        Self {
            name,
            memory: BotMemory::new(),
            risk: RiskAssessor::new(risk),
            cooldown: DEFAULT_FORESIGHT_COOLDOWN,
            rng,
        }
    }

    fn begin_play(&mut self, ctx: &PolicyContext) {
        let outcome = self.memory.begin_play(ctx.state);
        event!(
            target: "kitten_bot::foresight",
            Level::TRACE,
            policy = self.name,
            turn = self.memory.turn_counter(),
            outcome = ?outcome,
            known = self.memory.foresight().len(),
        );
    }

    fn foresight_due(&self, hand: &Hand) -> Option<Card> {
        if self.memory.foresight_due(self.cooldown) {
            hand.first_of(CardType::SeeTheFuture)
        } else {
            None
        }
    }

    fn play_card(
        &mut self,
        ctx: &PolicyContext,
        card: Card,
        reason: &str,
        signal: Option<&RiskSignal>,
    ) -> Option<Card> {
        self.memory.record_play(card, ctx.state);
        log_play_decision(self, ctx, Some(card), reason, signal);
        Some(card)
    }

    fn draw(
        &mut self,
        ctx: &PolicyContext,
        reason: &str,
        signal: Option<&RiskSignal>,
    ) -> Option<Card> {
        self.memory.record_draw();
        log_play_decision(self, ctx, None, reason, signal);
        None
    }

    /// Uniform choice among held cards of `kind`.
    fn pick_random(&mut self, hand: &Hand, kind: CardType) -> Option<Card> {
        let candidates: Vec<Card> = hand.of_kind(kind).collect();
        if candidates.is_empty() {
            return None;
        }
        candidates.choose(&mut self.rng).copied()
    }

    fn place(&mut self, ctx: &PolicyContext, use_foresight: bool) -> usize {
        self.memory.sync_for_placement(ctx.state);
        let known = use_foresight.then(|| self.memory.foresight());
        let placement = placement::choose_depth(ctx.state, known, &mut self.rng);
        self.memory.record_placement(placement.depth);
        log_placement(self, ctx, placement);
        placement.depth
    }

    fn reveal(&mut self, ctx: &PolicyContext, top: &[Card]) {
        self.memory.record_reveal(top, ctx.state);
        event!(
            target: "kitten_bot::foresight",
            Level::DEBUG,
            policy = self.name,
            turn = self.memory.turn_counter(),
            revealed = top.len(),
            eliminations = self.memory.foresight().known_eliminations(),
            next = %top.first().map(|card| card.to_string()).unwrap_or_default(),
        );
    }
}

pub(crate) fn decision_details_enabled() -> bool {
    std::env::var("KITTEN_DECISION_DETAILS")
        .map(|raw| matches!(raw.trim(), "1" | "true" | "TRUE" | "on" | "ON"))
        .unwrap_or(false)
}

fn log_play_decision<R>(
    core: &PolicyCore<R>,
    ctx: &PolicyContext,
    chosen: Option<Card>,
    reason: &str,
    signal: Option<&RiskSignal>,
) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    let choice = chosen
        .map(|card| card.to_string())
        .unwrap_or_else(|| "draw".to_string());
    let probability = signal.map(|signal| signal.probability).unwrap_or_default();

    if decision_details_enabled() {
        log_decision_details(core, ctx, &choice, probability, reason);
        return;
    }

    event!(
        target: "kitten_bot::play",
        Level::INFO,
        policy = core.name,
        turn = core.memory.turn_counter(),
        plays = core.memory.plays_this_turn(),
        hand_size = ctx.hand.len(),
        cards_left = ctx.state.cards_left(),
        known = core.memory.foresight().len(),
        probability,
        chosen = %choice,
        reason,
    );
}

fn log_decision_details<R>(
    core: &PolicyCore<R>,
    ctx: &PolicyContext,
    choice: &str,
    probability: f64,
    reason: &str,
) {
    let digest = HistoryDigest::from_state(ctx.state);
    event!(
        target: "kitten_bot::play",
        Level::INFO,
        policy = core.name,
        turn = core.memory.turn_counter(),
        plays = core.memory.plays_this_turn(),
        hand_size = ctx.hand.len(),
        cards_left = ctx.state.cards_left(),
        known = core.memory.foresight().len(),
        probability,
        eliminations_played = digest.eliminations_played,
        skips_played = digest.skips_played,
        defuses_played = digest.defuses_played,
        shuffles_played = digest.shuffles_played,
        defuses_exhausted = digest.defuses_exhausted,
        chosen = %choice,
        reason,
    );
}

fn log_placement<R>(core: &PolicyCore<R>, ctx: &PolicyContext, placement: Placement) {
    event!(
        target: "kitten_bot::placement",
        Level::INFO,
        policy = core.name,
        turn = core.memory.turn_counter(),
        cards_left = ctx.state.cards_left(),
        alive_bots = ctx.state.alive_bots(),
        depth = placement.depth,
        reason = ?placement.reason,
    );
}

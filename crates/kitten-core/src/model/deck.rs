use crate::model::card::{Card, CardType};
use crate::model::state::RemainingCounts;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

const NORMAL_CARDS: usize = 20;
const SKIP_CARDS: usize = 4;
const SEE_THE_FUTURE_CARDS: usize = 5;
const SHUFFLE_CARDS: usize = 4;
const SPARE_DEFUSE_CARDS: usize = 2;

/// Draw pile, index 0 is the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Pile left after dealing: one elimination card per player but one,
    /// and the spare defuses not handed out at the deal.
    pub fn standard(players: usize) -> Self {
        let layout = [
            (CardType::Normal, NORMAL_CARDS),
            (CardType::Skip, SKIP_CARDS),
            (CardType::SeeTheFuture, SEE_THE_FUTURE_CARDS),
            (CardType::Shuffle, SHUFFLE_CARDS),
            (CardType::Defuse, SPARE_DEFUSE_CARDS),
            (CardType::Elimination, players.saturating_sub(1).max(1)),
        ];
        let mut cards = Vec::new();
        let mut next_id = 0u16;
        for (kind, count) in layout {
            for _ in 0..count {
                cards.push(Card::new(next_id, kind));
                next_id += 1;
            }
        }
        Self { cards }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(players: usize, rng: &mut R) -> Self {
        let mut deck = Self::standard(players);
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(players: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(players, &mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn draw(&mut self) -> Option<Card> {
        if self.cards.is_empty() {
            None
        } else {
            Some(self.cards.remove(0))
        }
    }

    pub fn peek(&self, count: usize) -> &[Card] {
        &self.cards[..count.min(self.cards.len())]
    }

    /// Insert at `depth` from the top; depths past the bottom land at the bottom.
    pub fn insert_at(&mut self, depth: usize, card: Card) {
        let depth = depth.min(self.cards.len());
        self.cards.insert(depth, card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn remaining_counts(&self) -> RemainingCounts {
        RemainingCounts::from_cards(&self.cards)
    }
}

use crate::model::card::{Card, CardType};

/// Cards held by one player. Owned by the engine; policies only borrow it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.sort();
        hand
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
        self.sort();
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn of_kind(&self, kind: CardType) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied().filter(move |card| card.is(kind))
    }

    pub fn first_of(&self, kind: CardType) -> Option<Card> {
        self.of_kind(kind).next()
    }

    pub fn has(&self, kind: CardType) -> bool {
        self.first_of(kind).is_some()
    }

    pub fn count(&self, kind: CardType) -> usize {
        self.of_kind(kind).count()
    }

    fn sort(&mut self) {
        self.cards.sort_by(|a, b| a.kind.cmp(&b.kind).then(a.id.cmp(&b.id)));
    }
}

#[cfg(test)]
mod tests {
    use super::Hand;
    use crate::model::card::{Card, CardType};

    #[test]
    fn add_and_remove_cards() {
        let mut hand = Hand::new();
        let card = Card::new(3, CardType::Skip);
        hand.add(card);
        assert!(hand.contains(card));
        assert!(hand.remove(card));
        assert!(!hand.contains(card));
        assert!(!hand.remove(card));
    }

    #[test]
    fn cards_are_sorted_by_kind_then_id() {
        let mut hand = Hand::new();
        hand.add(Card::new(9, CardType::Defuse));
        hand.add(Card::new(4, CardType::Normal));
        hand.add(Card::new(1, CardType::Normal));
        let ordered: Vec<_> = hand.iter().copied().collect();
        assert_eq!(ordered[0], Card::new(1, CardType::Normal));
        assert_eq!(ordered[1], Card::new(4, CardType::Normal));
        assert_eq!(ordered[2], Card::new(9, CardType::Defuse));
    }

    #[test]
    fn kind_queries() {
        let hand = Hand::with_cards(vec![
            Card::new(2, CardType::Skip),
            Card::new(1, CardType::Skip),
            Card::new(5, CardType::Normal),
        ]);
        assert_eq!(hand.count(CardType::Skip), 2);
        assert_eq!(hand.first_of(CardType::Skip), Some(Card::new(1, CardType::Skip)));
        assert!(!hand.has(CardType::Defuse));
    }
}

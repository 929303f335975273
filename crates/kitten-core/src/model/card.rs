use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CardType {
    Normal = 0,
    Skip = 1,
    SeeTheFuture = 2,
    Defuse = 3,
    Elimination = 4,
    Shuffle = 5,
}

impl CardType {
    pub const COUNT: usize = 6;

    pub const ALL: [CardType; CardType::COUNT] = [
        CardType::Normal,
        CardType::Skip,
        CardType::SeeTheFuture,
        CardType::Defuse,
        CardType::Elimination,
        CardType::Shuffle,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(CardType::Normal),
            1 => Some(CardType::Skip),
            2 => Some(CardType::SeeTheFuture),
            3 => Some(CardType::Defuse),
            4 => Some(CardType::Elimination),
            5 => Some(CardType::Shuffle),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Playing this card ends the turn without a draw.
    pub const fn ends_turn(self) -> bool {
        matches!(self, CardType::Skip)
    }

    /// Playing this card reorders the draw pile.
    pub const fn reorders_pile(self) -> bool {
        matches!(self, CardType::Shuffle)
    }

    pub const fn is_elimination(self) -> bool {
        matches!(self, CardType::Elimination)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            CardType::Normal => "normal",
            CardType::Skip => "skip",
            CardType::SeeTheFuture => "see_the_future",
            CardType::Defuse => "defuse",
            CardType::Elimination => "elimination",
            CardType::Shuffle => "shuffle",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub kind: CardType,
    pub id: u16,
}

impl Card {
    pub const fn new(id: u16, kind: CardType) -> Self {
        Self { kind, id }
    }

    pub const fn is_elimination(self) -> bool {
        self.kind.is_elimination()
    }

    pub const fn is(self, kind: CardType) -> bool {
        self.kind as u8 == kind as u8
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}

use serde::{Deserialize, Serialize};

/// Number of table columns.
pub const COLUMNS: usize = 8;
/// Number of free cells.
pub const FREE_CELLS: usize = 4;
/// Number of home piles (one per suit).
pub const HOME_PILES: usize = 4;
/// Cards in a standard deck.
pub const DECK_SIZE: usize = 52;
/// Highest rank (King).
pub const KING: u8 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
}

impl Suit {
    #[inline]
    pub fn all() -> [Suit; 4] {
        [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
    }

    #[inline]
    pub fn color(self) -> Color {
        match self {
            Suit::Diamonds | Suit::Hearts => Color::Red,
            Suit::Clubs | Suit::Spades => Color::Black,
        }
    }

    /// Home pile index for this suit.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
        }
    }

    #[inline]
    pub fn to_char(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }

    #[inline]
    pub fn from_char(c: char) -> Option<Suit> {
        match c.to_ascii_lowercase() {
            'c' => Some(Suit::Clubs),
            'd' => Some(Suit::Diamonds),
            'h' => Some(Suit::Hearts),
            's' => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// Rank helpers: 1 = Ace .. 13 = King.
#[inline]
pub fn rank_to_char(rank: u8) -> Option<char> {
    match rank {
        1 => Some('A'),
        2..=9 => Some((b'0' + rank) as char),
        10 => Some('T'),
        11 => Some('J'),
        12 => Some('Q'),
        13 => Some('K'),
        _ => None,
    }
}

#[inline]
pub fn rank_from_str(s: &str) -> Option<u8> {
    match s {
        "A" | "a" | "1" => Some(1),
        "T" | "t" | "10" => Some(10),
        "J" | "j" => Some(11),
        "Q" | "q" => Some(12),
        "K" | "k" => Some(13),
        _ => match s.as_bytes() {
            [d @ b'2'..=b'9'] => Some(d - b'0'),
            _ => None,
        },
    }
}

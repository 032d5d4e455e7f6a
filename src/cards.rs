use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CardParseError, DealError};
use crate::types::{rank_from_str, rank_to_char, Color, Suit, DECK_SIZE, KING};

/// A playing card. Two cards with the same rank and suit are the same card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card {
    rank: u8, // 1..=13
    suit: Suit,
}

impl Card {
    /// Returns None when rank is outside 1..=13.
    #[inline]
    pub fn new(rank: u8, suit: Suit) -> Option<Self> {
        (1..=KING).contains(&rank).then_some(Self { rank, suit })
    }

    #[inline]
    pub fn rank(self) -> u8 {
        self.rank
    }

    #[inline]
    pub fn suit(self) -> Suit {
        self.suit
    }

    #[inline]
    pub fn color(self) -> Color {
        self.suit.color()
    }

    /// Dense index 0..52, suit-major. Used for hashing and duplicate checks.
    #[inline]
    pub fn ordinal(self) -> usize {
        self.suit.index() * KING as usize + (self.rank as usize - 1)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = rank_to_char(self.rank).unwrap_or('?');
        write!(f, "{}{}", r, self.suit.to_char())
    }
}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let err = || CardParseError(s.to_string());
        let suit_char = t.chars().last().ok_or_else(err)?;
        let suit = Suit::from_char(suit_char).ok_or_else(err)?;
        let rank = rank_from_str(&t[..t.len() - suit_char.len_utf8()]).ok_or_else(err)?;
        Card::new(rank, suit).ok_or_else(err)
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A fresh, owned, unshuffled deck: 2..K of each suit (c, d, h, s interleaved
/// per rank), then the four aces.
pub fn standard_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for rank in (2..=KING).chain(std::iter::once(1)) {
        for suit in Suit::all() {
            deck.push(Card { rank, suit });
        }
    }
    deck
}

/// A fresh deck shuffled with the caller's RNG.
pub fn shuffled_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    let mut deck = standard_deck();
    deck.shuffle(rng);
    deck
}

/// Checks that `cards` is exactly one standard deck (52 cards, no duplicates).
pub fn validate_deck(cards: &[Card]) -> Result<(), DealError> {
    if cards.len() != DECK_SIZE {
        return Err(DealError::WrongCount(cards.len()));
    }
    let mut seen = [false; DECK_SIZE];
    for &c in cards {
        if std::mem::replace(&mut seen[c.ordinal()], true) {
            return Err(DealError::Duplicate(c));
        }
    }
    Ok(())
}

/// Load a deal order from a JSON array of card strings, e.g. `["Ah", "7c", ...]`.
pub fn load_deal_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Card>, DealError> {
    let data = fs::read_to_string(path.as_ref())?;
    let deck: Vec<Card> = serde_json::from_str(&data)?;
    validate_deck(&deck)?;
    Ok(deck)
}

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::types::{Suit, COLUMNS, FREE_CELLS, HOME_PILES, KING};

/// One full snapshot of the table, free cells and home piles.
///
/// Columns are shared copy-on-write: cloning a board bumps eight reference
/// counts, and a mutation copies only the column it touches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Board {
    table: [Arc<Vec<Card>>; COLUMNS],
    // Occupied free cells in insertion order; removal shifts later entries down.
    free: Vec<Card>,
    // Top rank per suit pile (0 = empty).
    home: [u8; HOME_PILES],
}

/// Plain-data view of a board for display and serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub table: Vec<Vec<Card>>,
    pub free: Vec<Card>,
    pub home: Vec<Vec<Card>>,
}

impl Board {
    /// Build a board from raw parts. Stacking is not rule-checked; free cells
    /// beyond capacity are dropped and home ranks are clamped to King.
    pub fn from_parts(table: [Vec<Card>; COLUMNS], mut free: Vec<Card>, home: [u8; HOME_PILES]) -> Self {
        free.truncate(FREE_CELLS);
        Self {
            table: table.map(Arc::new),
            free,
            home: home.map(|r| r.min(KING)),
        }
    }

    /// Deal cards row by row: card `i` lands on column `i % 8`. A full deck
    /// gives six rows plus a seventh card on columns 0..=3. Card counts are
    /// not checked here; `GameState::from_deck` validates the deck first.
    pub fn deal(deck: &[Card]) -> Self {
        let mut table: [Vec<Card>; COLUMNS] = std::array::from_fn(|_| Vec::with_capacity(8));
        for (i, &card) in deck.iter().enumerate() {
            table[i % COLUMNS].push(card);
        }
        Self::from_parts(table, Vec::new(), [0; HOME_PILES])
    }

    #[inline]
    pub fn column(&self, idx: usize) -> Option<&[Card]> {
        self.table.get(idx).map(|c| c.as_slice())
    }

    #[inline]
    pub fn columns(&self) -> impl Iterator<Item = &[Card]> {
        self.table.iter().map(|c| c.as_slice())
    }

    #[inline]
    pub fn column_top(&self, idx: usize) -> Option<Card> {
        self.table.get(idx).and_then(|c| c.last().copied())
    }

    #[inline]
    pub fn push_column(&mut self, idx: usize, card: Card) {
        Arc::make_mut(&mut self.table[idx]).push(card);
    }

    #[inline]
    pub fn pop_column(&mut self, idx: usize) -> Option<Card> {
        let col = self.table.get_mut(idx)?;
        if col.is_empty() {
            return None;
        }
        Arc::make_mut(col).pop()
    }

    #[inline]
    pub fn free_cells(&self) -> &[Card] {
        &self.free
    }

    #[inline]
    pub fn free_card(&self, idx: usize) -> Option<Card> {
        self.free.get(idx).copied()
    }

    #[inline]
    pub fn free_is_full(&self) -> bool {
        self.free.len() >= FREE_CELLS
    }

    /// Returns false (and leaves the board untouched) when all cells are taken.
    #[inline]
    pub fn push_free(&mut self, card: Card) -> bool {
        if self.free_is_full() {
            return false;
        }
        self.free.push(card);
        true
    }

    #[inline]
    pub fn take_free(&mut self, idx: usize) -> Option<Card> {
        (idx < self.free.len()).then(|| self.free.remove(idx))
    }

    /// Top rank of the home pile for `suit` (0 when empty).
    #[inline]
    pub fn home_rank(&self, suit: Suit) -> u8 {
        self.home[suit.index()]
    }

    #[inline]
    pub fn home_ranks(&self) -> [u8; HOME_PILES] {
        self.home
    }

    /// Home pile as a card list (Ace first).
    pub fn home_pile(&self, suit: Suit) -> Vec<Card> {
        (1..=self.home_rank(suit)).filter_map(|r| Card::new(r, suit)).collect()
    }

    /// Caller must have checked the card is next for its pile.
    #[inline]
    pub fn push_home(&mut self, card: Card) {
        let slot = &mut self.home[card.suit().index()];
        debug_assert_eq!(*slot + 1, card.rank());
        *slot = card.rank();
    }

    #[inline]
    pub fn cards_home(&self) -> u8 {
        self.home.iter().sum()
    }

    #[inline]
    pub fn is_won(&self) -> bool {
        self.home.iter().all(|&r| r == KING)
    }

    /// Every card on the board, wherever it is. Order: table, free, home.
    pub fn all_cards(&self) -> Vec<Card> {
        let mut out: Vec<Card> = self.table.iter().flat_map(|c| c.iter().copied()).collect();
        out.extend_from_slice(&self.free);
        for suit in Suit::all() {
            out.extend(self.home_pile(suit));
        }
        out
    }

    pub fn view(&self) -> BoardView {
        BoardView {
            table: self.table.iter().map(|c| c.to_vec()).collect(),
            free: self.free.clone(),
            home: Suit::all().iter().map(|&s| self.home_pile(s)).collect(),
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "free:")?;
        for i in 0..FREE_CELLS {
            match self.free.get(i) {
                Some(c) => write!(f, " {c}")?,
                None => write!(f, " --")?,
            }
        }
        write!(f, "   home:")?;
        for suit in Suit::all() {
            match Card::new(self.home_rank(suit), suit) {
                Some(c) => write!(f, " {c}")?,
                None => write!(f, " 0{}", suit.to_char())?,
            }
        }
        writeln!(f)?;
        for (i, col) in self.table.iter().enumerate() {
            write!(f, "{i}:")?;
            for c in col.iter() {
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardView};
use crate::cards::{shuffled_deck, validate_deck, Card};
use crate::engine::apply::{apply_move, validate_move};
use crate::error::{DealError, MoveError};
use crate::search::{self, SearchConfig};
use crate::types::{COLUMNS, FREE_CELLS};

/// A move as plain data: kind plus integer indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Move {
    ColumnToColumn { src: usize, dst: usize },
    ColumnToFree { src: usize },
    FreeToColumn { src: usize, dst: usize },
    ColumnToHome { src: usize },
    FreeToHome { src: usize },
}

impl Move {
    #[inline]
    pub fn kind(self) -> &'static str {
        match self {
            Move::ColumnToColumn { .. } => "column_to_column",
            Move::ColumnToFree { .. } => "column_to_free",
            Move::FreeToColumn { .. } => "free_to_column",
            Move::ColumnToHome { .. } => "column_to_home",
            Move::FreeToHome { .. } => "free_to_home",
        }
    }

    #[inline]
    pub fn is_to_home(self) -> bool {
        matches!(self, Move::ColumnToHome { .. } | Move::FreeToHome { .. })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::ColumnToColumn { src, dst } | Move::FreeToColumn { src, dst } => {
                write!(f, "({}, {}, {})", self.kind(), src, dst)
            }
            Move::ColumnToFree { src } | Move::ColumnToHome { src } | Move::FreeToHome { src } => {
                write!(f, "({}, {})", self.kind(), src)
            }
        }
    }
}

/// Every legal move on `board`, in a fixed order:
/// column→column, column→free, free→column, column→home, free→home;
/// each by ascending source then destination index.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let free_len = board.free_cells().len();
    let mut candidates = Vec::with_capacity(COLUMNS * COLUMNS + COLUMNS + FREE_CELLS * COLUMNS + COLUMNS + FREE_CELLS);
    for src in 0..COLUMNS {
        for dst in 0..COLUMNS {
            if src != dst {
                candidates.push(Move::ColumnToColumn { src, dst });
            }
        }
    }
    candidates.extend((0..COLUMNS).map(|src| Move::ColumnToFree { src }));
    for src in 0..free_len {
        candidates.extend((0..COLUMNS).map(|dst| Move::FreeToColumn { src, dst }));
    }
    candidates.extend((0..COLUMNS).map(|src| Move::ColumnToHome { src }));
    candidates.extend((0..free_len).map(|src| Move::FreeToHome { src }));

    candidates.retain(|&mv| validate_move(board, mv).is_ok());
    candidates
}

#[inline]
pub fn is_won(board: &Board) -> bool {
    board.is_won()
}

/// The authoritative game: current board plus undo history.
///
/// `history` always holds at least one snapshot and its last entry is the
/// current board. Every successful move appends exactly one snapshot.
#[derive(Debug, Clone)]
pub struct GameState {
    history: Vec<Board>,
}

impl GameState {
    /// Start a game from a hand-built board (not rule-checked).
    #[inline]
    pub fn from_board(board: Board) -> Self {
        Self { history: vec![board] }
    }

    /// Deal `deck` in the given order without shuffling. The deck must be
    /// exactly one standard deck.
    pub fn from_deck(deck: &[Card]) -> Result<Self, DealError> {
        validate_deck(deck)?;
        Ok(Self::from_board(Board::deal(deck)))
    }

    /// Shuffle a fresh deck with `rng` and deal it.
    #[inline]
    pub fn dealt<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_board(Board::deal(&shuffled_deck(rng)))
    }

    /// Reset to a freshly shuffled deal using the thread RNG.
    pub fn start(&mut self) {
        self.start_with_rng(&mut rand::thread_rng());
    }

    pub fn start_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::dealt(rng);
    }

    #[inline]
    pub fn board(&self) -> &Board {
        // history is never empty
        &self.history[self.history.len() - 1]
    }

    #[inline]
    pub fn view(&self) -> BoardView {
        self.board().view()
    }

    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn is_won(&self) -> bool {
        self.board().is_won()
    }

    #[inline]
    pub fn cards_home(&self) -> u8 {
        self.board().cards_home()
    }

    #[inline]
    pub fn enumerate_moves(&self) -> Vec<Move> {
        legal_moves(self.board())
    }

    /// Validate and apply `mv`; on error nothing changes.
    pub fn apply(&mut self, mv: Move) -> Result<(), MoveError> {
        let next = apply_move(self.board(), mv)?;
        self.history.push(next);
        Ok(())
    }

    #[inline]
    pub fn move_column(&mut self, src: usize, dst: usize) -> Result<(), MoveError> {
        self.apply(Move::ColumnToColumn { src, dst })
    }

    #[inline]
    pub fn move_to_free(&mut self, src: usize) -> Result<(), MoveError> {
        self.apply(Move::ColumnToFree { src })
    }

    #[inline]
    pub fn move_from_free(&mut self, src: usize, dst: usize) -> Result<(), MoveError> {
        self.apply(Move::FreeToColumn { src, dst })
    }

    #[inline]
    pub fn column_to_home(&mut self, src: usize) -> Result<(), MoveError> {
        self.apply(Move::ColumnToHome { src })
    }

    #[inline]
    pub fn free_to_home(&mut self, src: usize) -> Result<(), MoveError> {
        self.apply(Move::FreeToHome { src })
    }

    /// Restore the previous snapshot. Fails on a fresh deal.
    pub fn undo(&mut self) -> Result<(), MoveError> {
        if self.history.len() <= 1 {
            return Err(MoveError::NothingToUndo);
        }
        self.history.pop();
        Ok(())
    }

    /// Ask the search engine for a move without applying it.
    pub fn recommend<R: Rng + ?Sized>(&self, config: &SearchConfig, rng: &mut R) -> Option<Move> {
        search::search(self.board(), config, rng).best
    }

    /// Search with `simulations` iterations and the default settings, then
    /// apply the recommended move. Returns the move played, if any.
    pub fn computer_play(&mut self, simulations: u32) -> Option<Move> {
        let config = SearchConfig { simulations, ..SearchConfig::default() };
        self.computer_play_with(&config, &mut rand::thread_rng())
    }

    pub fn computer_play_with<R: Rng + ?Sized>(&mut self, config: &SearchConfig, rng: &mut R) -> Option<Move> {
        let mv = self.recommend(config, rng)?;
        // The search only returns moves legal on this board.
        self.apply(mv).ok()?;
        Some(mv)
    }
}

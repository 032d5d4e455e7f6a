use thiserror::Error;

use crate::cards::Card;

/// Why a move (or undo) was rejected. A rejected operation never changes state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("column {0} is out of range")]
    ColumnOutOfRange(usize),
    #[error("column {0} is empty")]
    EmptyColumn(usize),
    #[error("free cell {0} is not occupied")]
    EmptyFreeCell(usize),
    #[error("all free cells are occupied")]
    FreeCellsFull,
    #[error("{moving} cannot be stacked on {onto}")]
    IllegalStack { moving: Card, onto: Card },
    #[error("{0} is not the next card for its home pile")]
    NotNextHome(Card),
    #[error("nothing to undo")]
    NothingToUndo,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid card '{0}': expected rank (A,2-9,T,J,Q,K) followed by suit (c,d,h,s)")]
pub struct CardParseError(pub String);

#[derive(Debug, Error)]
pub enum DealError {
    #[error("failed to read deal: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse deal JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("deal must contain exactly 52 cards, got {0}")]
    WrongCount(usize),
    #[error("duplicate card {0} in deal")]
    Duplicate(Card),
}

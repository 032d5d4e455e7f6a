use crate::board::Board;
use crate::cards::Card;
use crate::error::MoveError;
use crate::rules::{can_go_home, can_stack};
use crate::state::Move;
use crate::types::COLUMNS;

#[inline]
fn column_index(idx: usize) -> Result<usize, MoveError> {
    if idx < COLUMNS {
        Ok(idx)
    } else {
        Err(MoveError::ColumnOutOfRange(idx))
    }
}

#[inline]
fn column_top(board: &Board, idx: usize) -> Result<Card, MoveError> {
    board.column_top(column_index(idx)?).ok_or(MoveError::EmptyColumn(idx))
}

#[inline]
fn free_card(board: &Board, idx: usize) -> Result<Card, MoveError> {
    board.free_card(idx).ok_or(MoveError::EmptyFreeCell(idx))
}

#[inline]
fn check_stack(board: &Board, moving: Card, dst: usize) -> Result<(), MoveError> {
    let onto = board.column_top(column_index(dst)?);
    if can_stack(moving, onto) {
        Ok(())
    } else {
        // can_stack only fails against a real card
        Err(MoveError::IllegalStack { moving, onto: onto.unwrap_or(moving) })
    }
}

#[inline]
fn check_home(board: &Board, card: Card) -> Result<(), MoveError> {
    if can_go_home(card.rank(), board.home_rank(card.suit())) {
        Ok(())
    } else {
        Err(MoveError::NotNextHome(card))
    }
}

/// Check every precondition of `mv` against `board` without touching it.
pub fn validate_move(board: &Board, mv: Move) -> Result<(), MoveError> {
    match mv {
        Move::ColumnToColumn { src, dst } => {
            let moving = column_top(board, src)?;
            check_stack(board, moving, dst)
        }
        Move::ColumnToFree { src } => {
            column_top(board, src)?;
            if board.free_is_full() {
                return Err(MoveError::FreeCellsFull);
            }
            Ok(())
        }
        Move::FreeToColumn { src, dst } => {
            let moving = free_card(board, src)?;
            check_stack(board, moving, dst)
        }
        Move::ColumnToHome { src } => check_home(board, column_top(board, src)?),
        Move::FreeToHome { src } => check_home(board, free_card(board, src)?),
    }
}

/// Apply a move as a pure transform: returns the successor board on success.
/// The input board is never modified, so a rejected move has no effect.
pub fn apply_move(board: &Board, mv: Move) -> Result<Board, MoveError> {
    validate_move(board, mv)?;

    let mut next = board.clone();
    // Preconditions hold from here on; the Option returns below cannot be None.
    match mv {
        Move::ColumnToColumn { src, dst } => {
            if let Some(card) = next.pop_column(src) {
                next.push_column(dst, card);
            }
        }
        Move::ColumnToFree { src } => {
            if let Some(card) = next.pop_column(src) {
                next.push_free(card);
            }
        }
        Move::FreeToColumn { src, dst } => {
            if let Some(card) = next.take_free(src) {
                next.push_column(dst, card);
            }
        }
        Move::ColumnToHome { src } => {
            if let Some(card) = next.pop_column(src) {
                next.push_home(card);
            }
        }
        Move::FreeToHome { src } => {
            if let Some(card) = next.take_free(src) {
                next.push_home(card);
            }
        }
    }
    Ok(next)
}

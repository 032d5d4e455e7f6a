#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // may be revisited
#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]

pub mod types;
pub mod error;
pub mod rules;
pub mod cards;
pub mod board;
pub mod state;
pub mod hash;
pub mod rng;

pub mod engine {
    pub mod apply;
}

pub mod search;
pub mod autoplay;

// Re-exports: stable minimal API surface for external callers
pub use crate::autoplay::{play_out, PlayLimits, PlayOutcome, StopReason};
pub use crate::board::{Board, BoardView};
pub use crate::cards::{load_deal_from_json, standard_deck, Card};
pub use crate::engine::apply::{apply_move, validate_move};
pub use crate::error::{CardParseError, DealError, MoveError};
pub use crate::hash::board_key;
pub use crate::rng::{rng_for_deal, rng_for_search};
pub use crate::search::{computer_play, search, SearchConfig, SearchReport};
pub use crate::state::{is_won, legal_moves, GameState, Move};
pub use crate::types::{Color, Suit};

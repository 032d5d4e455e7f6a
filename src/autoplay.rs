use hashbrown::HashMap;
use rand::Rng;
use serde::Serialize;

use crate::hash::board_key;
use crate::search::SearchConfig;
use crate::state::GameState;

#[derive(Debug, Clone, Copy)]
pub struct PlayLimits {
    pub max_moves: u32,
    /// Stop once any position has been reached this many times.
    pub max_repeats: u32,
}

impl Default for PlayLimits {
    fn default() -> Self {
        Self { max_moves: 300, max_repeats: 3 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    Won,
    Stuck,
    MoveLimit,
    Repetition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayOutcome {
    pub won: bool,
    pub moves: u32,
    pub cards_home: u8,
    pub stop: StopReason,
}

/// Let the search engine play `state` until it wins, runs out of moves, hits
/// the move limit or starts cycling.
pub fn play_out<R: Rng + ?Sized>(
    state: &mut GameState,
    config: &SearchConfig,
    limits: &PlayLimits,
    rng: &mut R,
) -> PlayOutcome {
    let mut seen: HashMap<u64, u32> = HashMap::new();
    seen.insert(board_key(state.board()), 1);
    let mut moves = 0u32;

    let stop = loop {
        if state.is_won() {
            break StopReason::Won;
        }
        if moves >= limits.max_moves {
            break StopReason::MoveLimit;
        }
        if state.computer_play_with(config, rng).is_none() {
            break StopReason::Stuck;
        }
        moves += 1;
        let count = seen.entry(board_key(state.board())).or_insert(0);
        *count += 1;
        if *count >= limits.max_repeats {
            break StopReason::Repetition;
        }
    };

    PlayOutcome { won: stop == StopReason::Won, moves, cards_home: state.cards_home(), stop }
}

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::Board;
use crate::engine::apply::apply_move;
use crate::state::{legal_moves, Move};

/// How a rollout picks its next move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RolloutPolicy {
    /// Uniform among to-home moves when any exist, otherwise uniform among all.
    #[default]
    HomeFirst,
    /// Uniform among all legal moves.
    Uniform,
}

impl RolloutPolicy {
    pub fn choose<R: Rng + ?Sized>(self, moves: &[Move], rng: &mut R) -> Option<Move> {
        if self == RolloutPolicy::HomeFirst {
            let home: Vec<Move> = moves.iter().copied().filter(|m| m.is_to_home()).collect();
            if let Some(&mv) = home.choose(rng) {
                return Some(mv);
            }
        }
        moves.choose(rng).copied()
    }
}

/// Random playout of at most `depth` moves from a clone of `board`.
/// Returns true when a won position is seen before a move is due.
pub fn rollout<R: Rng + ?Sized>(board: &Board, depth: u32, policy: RolloutPolicy, rng: &mut R) -> bool {
    let mut current = board.clone();
    for _ in 0..depth {
        if current.is_won() {
            return true;
        }
        let moves = legal_moves(&current);
        let Some(mv) = policy.choose(&moves, rng) else {
            return false;
        };
        match apply_move(&current, mv) {
            Ok(next) => current = next,
            Err(_) => return false,
        }
    }
    false
}

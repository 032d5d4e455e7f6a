use rand::SeedableRng;
use rand_pcg::Pcg64;

const GOLDEN: u64 = 0x9E37_79B9_7F4A_7C15;

/// Deterministic RNG for dealing game `game_id` of a run seeded with `seed`.
///
/// - Derives a per-game 64-bit seed as `seed ^ (game_id * GOLDEN)`.
/// - Uses PCG 64-bit generator (rand_pcg::Pcg64) for reproducible sequences.
#[inline]
pub fn rng_for_deal(seed: u64, game_id: u64) -> Pcg64 {
    Pcg64::seed_from_u64(seed ^ game_id.wrapping_mul(GOLDEN))
}

/// Deterministic RNG for one search tree (or one turn of self-play).
/// Kept distinct from deal streams so the same seed never replays a shuffle.
#[inline]
pub fn rng_for_search(seed: u64, stream: u64) -> Pcg64 {
    Pcg64::seed_from_u64(!seed ^ stream.wrapping_add(1).wrapping_mul(GOLDEN).rotate_left(29))
}

use crate::board::Board;
use crate::types::Suit;

/// SplitMix64 PRNG step for stable, fast token generation.
#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

// Domain tags (arbitrary but fixed)
const DOM_TABLE: u64 = 0xF5EE_CE11_0000_0001;
const DOM_FREE: u64 = 0xF5EE_CE11_0000_00A0;
const DOM_HOME: u64 = 0xF5EE_CE11_0000_00C0;

#[inline]
pub fn z_token_table(column: usize, depth: usize, card_ordinal: usize) -> u64 {
    splitmix64(DOM_TABLE ^ (column as u64) ^ ((depth as u64) << 8) ^ ((card_ordinal as u64) << 16))
}

#[inline]
pub fn z_token_free(card_ordinal: usize) -> u64 {
    splitmix64(DOM_FREE ^ ((card_ordinal as u64) << 8))
}

#[inline]
pub fn z_token_home(suit: Suit, rank: u8) -> u64 {
    splitmix64(DOM_HOME ^ (suit.index() as u64) ^ (u64::from(rank) << 8))
}

/// Position key for repetition detection. Free cells hash as an unordered
/// set, so the same cards in a different slot order give the same key.
pub fn board_key(board: &Board) -> u64 {
    let mut z: u64 = 0;
    for (col, cards) in board.columns().enumerate() {
        for (depth, card) in cards.iter().enumerate() {
            z ^= z_token_table(col, depth, card.ordinal());
        }
    }
    for card in board.free_cells() {
        z ^= z_token_free(card.ordinal());
    }
    for suit in Suit::all() {
        z ^= z_token_home(suit, board.home_rank(suit));
    }
    z
}

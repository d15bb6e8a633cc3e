pub mod opponent;
pub mod reward;

pub use opponent::{decode_opponents, encode_opponents, raise_count_from, OpponentBucket};
pub use reward::reward_counter;

/// which round the closed-length-3k position belongs to: 0 preflop,
/// 1 flop, 2 turn, 3 river.
pub fn round_of(history_len: usize) -> usize {
    history_len / 3
}

/// true iff a history of this length represents a closed round boundary
/// (length is a multiple of 3).
pub fn round_closed(history_len: usize) -> bool {
    history_len % 3 == 0
}

pub mod cards;
pub mod classify;
pub mod debug;
pub mod decision;
pub mod history;
pub mod mccfr;
pub mod persistence;
pub mod solver;
pub mod tables;

/// dimensional analysis types
pub type Chips = i64;
pub type Utility = f32;
pub type Probability = f32;

// reward-counter training units, matching the canonical chip denomination
// the original implementation trained against.
pub const SB_TRAIN: Chips = 1;
pub const CALL_TRAIN: Chips = 2;
pub const ALLIN_TRAIN: Chips = 200;

// opponent population size the abstracted game seats around the AI.
pub const MAX_OPPONENTS: u8 = 8;
pub const UPPER_BUCKET_THRESHOLD: u8 = 4;
pub const MAX_RAISE_REPEATS: usize = 3;

// runtime decision fine-tuning constants, named after the original source's
// own constants so the re-weighting cascade in `decision` reads the same way.
pub const ALLIN_REDUCE: f32 = 0.8;
pub const RAISE_REDUCE: f32 = 0.9;
pub const RAISE_LIMIT_MULTIPLIER: f32 = 50.0;
pub const MONEY_TOO_BIG_PASS: f32 = 0.3;
pub const FOLD_REDUCE: f32 = 0.7;
pub const REPEATING_REDUCE: f32 = 0.5;
pub const RAISE_SMALLEST_AMOUNT: f32 = 500.0;

// average-strategy (outcome) sampler defaults.
pub const SAMPLER_EPSILON: Probability = 0.05;
pub const SAMPLER_TAU: f32 = 1000.0;
pub const SAMPLER_BETA: f32 = 1_000_000.0;

/// trait for deterministic randomized fixtures, used by property tests
/// instead of reaching for an external fuzzing crate.
pub trait Arbitrary {
    fn random() -> Self;
}

/// install the env-configured logger. idempotent: safe to call from
/// both binaries and from tests that exercise logging paths.
#[cfg(feature = "cli")]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(false).try_init();
}

pub mod evaluate;
pub mod grade;
pub mod potential;
pub mod synthesize;

pub use evaluate::classify;
pub use evaluate::highest_card;
pub use grade::Grade;
pub use potential::classify_starting_hand;
pub use synthesize::synthesize;

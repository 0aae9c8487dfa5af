//! Assignment rules and outcomes.

mod outcome;
mod rules;

pub use outcome::{Assignment, Reassignment};
pub use rules::{assign, reassign, reassign_within};

//! Store-agnostic assignment coordination.

mod sequential;

pub use sequential::SequentialAssignmentCoordinator;

//! Port contracts for assignment coordination.

mod coordinator;

pub use coordinator::{AssignmentCoordinator, AssignmentError, AssignmentResult, RecordRef};

//! Store-specific assignment coordinators.

pub mod postgres;

//! Task lifecycle management.
//!
//! Tasks are created `available`, move through `todo` and `done` by edits
//! that stamp their start and completion dates, can be reset, and are
//! soft-deleted rather than removed. Assignment to a project is handled by
//! [`crate::assignment`].
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

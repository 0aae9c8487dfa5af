//! Project management.
//!
//! Projects group tasks through an ordered list of task references. The
//! list itself is only changed by the [`crate::assignment`] coordinator;
//! this module covers creation, whitelisted edits, soft deletion, and
//! listing with the referenced tasks joined in.
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

//! Task-to-project assignment.
//!
//! Assigning and moving a task touches a task record and one or two
//! project records. The rules that change those records live in
//! [`domain`]; [`ports::AssignmentCoordinator`] is the seam callers use,
//! with a store-agnostic implementation in [`services`] and a
//! transactional `PostgreSQL` implementation in [`adapters`].

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

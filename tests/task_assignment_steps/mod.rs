//! Step definitions for task assignment scenarios.

mod given;
mod when;
pub mod world;

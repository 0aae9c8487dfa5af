//! Unit tests for the sequential assignment coordinator.

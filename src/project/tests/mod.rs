//! Unit tests for project rules and the project service.

//! Caller-facing classification of service failures.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad category of a failed command, independent of which service raised it.
///
/// Request handlers map this onto their own status codes; the services only
/// promise which category a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required field is missing or a value is outside its allowed set.
    Validation,
    /// The addressed record does not exist or has been soft-deleted.
    NotFound,
    /// The command conflicts with the current state of a record.
    Conflict,
    /// The backing store failed.
    Persistence,
}

impl ErrorKind {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Persistence => "persistence",
        }
    }

    /// Returns `true` when the failure was caused by the caller's input or
    /// the state of the addressed records rather than by infrastructure.
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        !matches!(self, Self::Persistence)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

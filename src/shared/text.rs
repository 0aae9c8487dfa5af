//! Validated free-text fields for tasks and projects.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Error returned when a required text field is blank.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{field} must not be empty")]
pub struct TextFieldError {
    /// Name of the rejected field.
    pub field: &'static str,
}

fn non_blank(value: String, field: &'static str) -> Result<String, TextFieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TextFieldError { field });
    }
    if trimmed.len() == value.len() {
        return Ok(value);
    }
    Ok(trimmed.to_owned())
}

/// Display name of a task or project, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordName(String);

impl RecordName {
    /// Creates a validated name.
    ///
    /// # Errors
    ///
    /// Returns [`TextFieldError`] when the value is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TextFieldError> {
        non_blank(value.into(), "name").map(Self)
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RecordName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RecordName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Description of a task or project, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordDescription(String);

impl RecordDescription {
    /// Creates a validated description.
    ///
    /// # Errors
    ///
    /// Returns [`TextFieldError`] when the value is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TextFieldError> {
        non_blank(value.into(), "description").map(Self)
    }

    /// Returns the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RecordDescription {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RecordDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

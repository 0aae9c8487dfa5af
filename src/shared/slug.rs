//! Display slugs derived from record names.

use super::RecordName;
use serde::Serialize;
use std::fmt;

/// Lowercase, hyphen-separated rendering of a record name.
///
/// Slugs are display-only and not unique: two records with the same name
/// share a slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Derives a slug from a validated name.
    #[must_use]
    pub fn derive(name: &RecordName) -> Self {
        Self::from_text(name.as_str())
    }

    /// Restores a slug read back from storage without re-deriving it.
    #[must_use]
    pub fn from_persisted(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    fn from_text(text: &str) -> Self {
        let mut slug = String::with_capacity(text.len());
        let mut pending_separator = false;
        for ch in text.chars() {
            if ch.is_alphanumeric() {
                if pending_separator && !slug.is_empty() {
                    slug.push('-');
                }
                pending_separator = false;
                slug.extend(ch.to_lowercase());
            } else {
                pending_separator = true;
            }
        }
        Self(slug)
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

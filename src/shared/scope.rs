//! Visibility of soft-deleted records in repository lookups.

/// Controls whether a lookup may return soft-deleted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeletionScope {
    /// Only records that have not been soft-deleted.
    #[default]
    ActiveOnly,
    /// Active and soft-deleted records alike.
    IncludeDeleted,
}

impl DeletionScope {
    /// Returns `true` when a record with the given deletion flag is visible
    /// under this scope.
    #[must_use]
    pub const fn admits(self, is_deleted: bool) -> bool {
        match self {
            Self::ActiveOnly => !is_deleted,
            Self::IncludeDeleted => true,
        }
    }
}

//! Diesel schema for project persistence.

diesel::table! {
    /// Project records with their ordered task references.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Slug derived from the name.
        #[max_length = 255]
        slug -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Planned start.
        start_date -> Nullable<Timestamptz>,
        /// Due date.
        due_date -> Timestamptz,
        /// Task references in list order.
        task_ids -> Array<Uuid>,
        /// Soft-deletion flag.
        is_deleted -> Bool,
        /// Soft-deletion timestamp.
        deleted_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

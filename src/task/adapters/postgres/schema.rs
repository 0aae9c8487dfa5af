//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Slug derived from the name.
        #[max_length = 255]
        slug -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Task status.
        #[max_length = 20]
        status -> Varchar,
        /// When the task last entered `todo`.
        start_date -> Nullable<Timestamptz>,
        /// Due date.
        due_date -> Timestamptz,
        /// When the task last entered `done`.
        done_date -> Nullable<Timestamptz>,
        /// Owning project.
        project_id -> Nullable<Uuid>,
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

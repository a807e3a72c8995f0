//! Diesel schema for task persistence.

diesel::table! {
    /// Task records with soft-deletion support.
    tasks (id) {
        /// Storage-assigned task identifier.
        id -> Int8,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Optional category label.
        #[max_length = 100]
        category -> Nullable<Varchar>,
        /// Optional color tag.
        #[max_length = 20]
        color -> Nullable<Varchar>,
        /// Task deadline.
        due_date -> Timestamptz,
        /// Completion status.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Soft-deletion timestamp; `NULL` while active.
        deleted_at -> Nullable<Timestamptz>,
    }
}

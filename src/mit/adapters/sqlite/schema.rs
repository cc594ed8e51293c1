//! Diesel schema for MIT persistence.

diesel::table! {
    /// MIT records partitioned by calendar date.
    mits (id) {
        /// Record identifier (UUID in text form).
        id -> Text,
        /// Description text.
        description -> Text,
        /// Completion flag.
        completed -> Bool,
        /// Display order within the date partition.
        order -> Integer,
        /// Calendar date in `YYYY-MM-DD` text form.
        date -> Date,
        /// Creation timestamp.
        created_at -> TimestamptzSqlite,
        /// Last mutation timestamp.
        updated_at -> TimestamptzSqlite,
    }
}

//! Diesel row models for MIT persistence.

use super::schema::mits;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for MIT records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = mits)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MitRow {
    /// Record identifier in text form.
    pub id: String,
    /// Description text.
    pub description: String,
    /// Completion flag.
    pub completed: bool,
    /// Display order within the date partition.
    pub order: i32,
    /// Calendar date.
    pub date: NaiveDate,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for MIT records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = mits)]
pub struct NewMitRow {
    /// Record identifier in text form.
    pub id: String,
    /// Description text.
    pub description: String,
    /// Completion flag.
    pub completed: bool,
    /// Display order within the date partition.
    pub order: i32,
    /// Calendar date.
    pub date: NaiveDate,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial-update changeset; `None` columns are left untouched.
///
/// `updated_at` is always present so every update refreshes it, which also
/// keeps the changeset from ever being empty.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = mits)]
pub struct MitChangeset {
    /// Replacement description, if any.
    pub description: Option<String>,
    /// Replacement completion flag, if any.
    pub completed: Option<bool>,
    /// Replacement display order, if any.
    pub order: Option<i32>,
    /// Replacement calendar date, if any.
    pub date: Option<NaiveDate>,
    /// Refreshed mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

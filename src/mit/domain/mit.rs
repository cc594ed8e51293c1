//! MIT aggregate root, creation draft, and partial-update changeset.

use super::{MitDate, MitId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted Most Important Task record.
///
/// Identity and timestamps are assigned by the persistence adapter at insert
/// time; `updated_at` refreshes on every mutation. The serialized form uses
/// the camelCase field names the protocol layer emits to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mit {
    id: MitId,
    description: String,
    completed: bool,
    order: i32,
    date: MitDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted MIT record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedMitData {
    /// Persisted identifier.
    pub id: MitId,
    /// Persisted description text.
    pub description: String,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted display order within the date partition.
    pub order: i32,
    /// Persisted calendar date.
    pub date: MitDate,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest-mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Mit {
    /// Reconstructs a MIT from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedMitData) -> Self {
        Self {
            id: data.id,
            description: data.description,
            completed: data.completed,
            order: data.order,
            date: data.date,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> MitId {
        self.id
    }

    /// Returns the description text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns whether the task is completed.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the display order within the date partition.
    #[must_use]
    pub const fn order(&self) -> i32 {
        self.order
    }

    /// Returns the calendar date the task is scheduled for.
    #[must_use]
    pub const fn date(&self) -> MitDate {
        self.date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest-mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Draft of a new MIT, fully resolved by the service before insert.
///
/// The persistence adapter assigns identity and timestamps; `completed`
/// always starts out false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMit {
    /// Description text for the new task.
    pub description: String,
    /// Resolved display order within the date partition.
    pub order: i32,
    /// Target calendar date.
    pub date: MitDate,
}

/// Partial update of a MIT; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MitChanges {
    /// Replacement description, if any.
    pub description: Option<String>,
    /// Replacement completion flag, if any.
    pub completed: Option<bool>,
    /// Replacement display order, if any.
    pub order: Option<i32>,
    /// Replacement calendar date, if any. Moving a task to another date is
    /// not re-validated against the past-date or daily-cap rules.
    pub date: Option<MitDate>,
}

impl MitChanges {
    /// Creates an empty changeset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a replacement completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Sets a replacement display order.
    #[must_use]
    pub const fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    /// Sets a replacement calendar date.
    #[must_use]
    pub const fn with_date(mut self, date: MitDate) -> Self {
        self.date = Some(date);
        self
    }
}

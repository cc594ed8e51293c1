//! Local calendar-date value type for MIT partitioning.

use super::MitDomainError;
use chrono::{DateTime, Local, NaiveDate};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar date of a MIT in zero-padded `YYYY-MM-DD` form.
///
/// The wrapped value is always derived from **local** timezone calendar
/// fields, never from UTC, so the reported date does not shift near midnight
/// for users with a non-zero UTC offset. Because the formatted form is
/// zero-padded, lexicographic ordering of the strings agrees with the
/// chronological ordering of the dates, and [`Ord`] agrees with both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MitDate(NaiveDate);

impl MitDate {
    /// Canonical formatting and parsing pattern.
    const FORMAT: &'static str = "%Y-%m-%d";

    /// Parses a strict zero-padded `YYYY-MM-DD` date string.
    ///
    /// Values that parse but do not round-trip to the identical string
    /// (unpadded months or days, trailing garbage) are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`MitDomainError::InvalidDateFormat`] when the value is not a
    /// canonical calendar date.
    pub fn parse(value: &str) -> Result<Self, MitDomainError> {
        let parsed = NaiveDate::parse_from_str(value, Self::FORMAT)
            .map_err(|_| MitDomainError::InvalidDateFormat(value.to_owned()))?;
        let canonical = parsed.format(Self::FORMAT).to_string();
        if canonical != value {
            return Err(MitDomainError::InvalidDateFormat(value.to_owned()));
        }
        Ok(Self(parsed))
    }

    /// Returns today's date from the clock's local calendar fields.
    #[must_use]
    pub fn today(clock: &impl Clock) -> Self {
        Self(clock.local().date_naive())
    }

    /// Returns the local calendar date of an arbitrary instant.
    #[must_use]
    pub fn from_local_datetime(instant: DateTime<Local>) -> Self {
        Self(instant.date_naive())
    }

    /// Wraps an already-validated calendar date.
    #[must_use]
    pub const fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the wrapped calendar date.
    #[must_use]
    pub const fn into_inner(self) -> NaiveDate {
        self.0
    }
}

impl TryFrom<String> for MitDate {
    type Error = MitDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MitDate> for String {
    fn from(date: MitDate) -> Self {
        date.to_string()
    }
}

impl fmt::Display for MitDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

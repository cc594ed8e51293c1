//! Error types for MIT domain validation and business rules.

use super::MitDate;
use thiserror::Error;

/// Errors returned while validating MIT values and creation rules.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MitDomainError {
    /// The date string does not follow zero-padded `YYYY-MM-DD` form.
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDateFormat(String),

    /// The MIT identifier is not a valid UUID.
    #[error("invalid MIT id '{0}', expected a UUID")]
    InvalidId(String),

    /// Creation targeted a date before today's local calendar date.
    #[error("cannot create MITs for past dates: {date} is before today ({today})")]
    PastDate {
        /// The rejected target date.
        date: MitDate,
        /// Today's local calendar date at the time of the check.
        today: MitDate,
    },

    /// Creation would exceed the configured per-date cap.
    #[error("daily limit of {limit} MITs reached for {date}")]
    DailyLimitReached {
        /// The configured maximum number of MITs per date.
        limit: usize,
        /// The date whose partition is full.
        date: MitDate,
    },
}

//! Service layer enforcing MIT creation rules and query policy.

use crate::mit::{
    domain::{Mit, MitChanges, MitDate, MitDomainError, MitId, NewMit},
    ports::{MitQuery, MitRepository, MitRepositoryError, MitRepositoryResult},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Default maximum number of MITs per calendar date.
pub const DEFAULT_DAILY_LIMIT: usize = 3;

/// Row limit applied to [`MitService::find`] when the filter names none.
pub const DEFAULT_FIND_LIMIT: i64 = 100;

/// Largest row limit the service will execute.
pub const MAX_FIND_LIMIT: i64 = 10_000;

/// Request payload for creating a MIT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMitRequest {
    description: String,
    order: Option<i32>,
    date: MitDate,
}

impl CreateMitRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(description: impl Into<String>, date: MitDate) -> Self {
        Self {
            description: description.into(),
            order: None,
            date,
        }
    }

    /// Sets an explicit display order, bypassing sequential assignment.
    #[must_use]
    pub const fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }
}

/// Range/filter arguments for [`MitService::find`]; every field optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MitFilter {
    start_date: Option<MitDate>,
    end_date: Option<MitDate>,
    completed: Option<bool>,
    limit: Option<i64>,
}

impl MitFilter {
    /// Creates an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the inclusive lower date bound.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: MitDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets the inclusive upper date bound.
    #[must_use]
    pub const fn with_end_date(mut self, end_date: MitDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Restricts results to the given completion state.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Sets the maximum number of rows to return.
    #[must_use]
    pub const fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Service-level errors for MIT operations.
#[derive(Debug, Error)]
pub enum MitServiceError {
    /// Business-rule or value validation failed.
    #[error(transparent)]
    Domain(#[from] MitDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] MitRepositoryError),
}

/// Result type for MIT service operations.
pub type MitServiceResult<T> = Result<T, MitServiceError>;

/// MIT tracking service.
///
/// Owns an explicitly injected repository and clock; enforces the past-date
/// and daily-cap rules on creation and resolves the range-query defaulting
/// policy before queries reach the persistence port.
pub struct MitService<R, C>
where
    R: MitRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    daily_limit: usize,
}

impl<R, C> Clone for MitService<R, C>
where
    R: MitRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            daily_limit: self.daily_limit,
        }
    }
}

impl<R, C> MitService<R, C>
where
    R: MitRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service with the default daily limit.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            daily_limit: DEFAULT_DAILY_LIMIT,
        }
    }

    /// Overrides the daily creation limit; values below 1 are floored to 1.
    #[must_use]
    pub const fn with_daily_limit(mut self, daily_limit: usize) -> Self {
        self.daily_limit = if daily_limit == 0 { 1 } else { daily_limit };
        self
    }

    /// Returns the configured daily creation limit.
    #[must_use]
    pub const fn daily_limit(&self) -> usize {
        self.daily_limit
    }

    /// Creates a MIT after validating the creation rules.
    ///
    /// The target date must not precede today's local calendar date, and the
    /// date partition must hold fewer than the configured daily limit. When
    /// the request carries no explicit order, the next sequential value is
    /// assigned: one above the highest existing order for the date, or 1 for
    /// an empty partition. The cap check and the insert are separate
    /// repository calls, so concurrent creators can overshoot the cap; that
    /// race is an accepted property of the design.
    ///
    /// # Errors
    ///
    /// Returns [`MitDomainError::PastDate`] or
    /// [`MitDomainError::DailyLimitReached`] for rule violations, or
    /// [`MitServiceError::Repository`] when persistence fails.
    pub async fn create(&self, request: CreateMitRequest) -> MitServiceResult<Mit> {
        let today = MitDate::today(&*self.clock);
        if request.date < today {
            return Err(MitDomainError::PastDate {
                date: request.date,
                today,
            }
            .into());
        }

        let existing = self.repository.list_for_date(request.date).await?;
        if existing.len() >= self.daily_limit {
            return Err(MitDomainError::DailyLimitReached {
                limit: self.daily_limit,
                date: request.date,
            }
            .into());
        }

        let order = request.order.unwrap_or_else(|| next_order(&existing));
        let created = self
            .repository
            .insert(NewMit {
                description: request.description,
                order,
                date: request.date,
            })
            .await?;
        Ok(created)
    }

    /// Executes a range/filter query.
    ///
    /// When neither date bound is given the query targets exactly today's
    /// local date; a single bound yields a one-sided inclusive range. The
    /// completion filter is ANDed with the date predicate. The row limit
    /// defaults to [`DEFAULT_FIND_LIMIT`] and is clamped into
    /// `1..=`[`MAX_FIND_LIMIT`] regardless of what the caller requested.
    /// Results are ordered by date descending, then order ascending.
    ///
    /// # Errors
    ///
    /// Returns [`MitServiceError::Repository`] when the query fails.
    pub async fn find(&self, filter: MitFilter) -> MitServiceResult<Vec<Mit>> {
        let (start_date, end_date) = match (filter.start_date, filter.end_date) {
            (None, None) => {
                let today = MitDate::today(&*self.clock);
                (Some(today), Some(today))
            }
            bounds => bounds,
        };
        let limit = filter
            .limit
            .unwrap_or(DEFAULT_FIND_LIMIT)
            .clamp(1, MAX_FIND_LIMIT);

        let result = self
            .repository
            .query(MitQuery {
                start_date,
                end_date,
                completed: filter.completed,
                limit,
            })
            .await;
        Ok(result?)
    }

    /// Returns every stored MIT, ordered by `order` ascending.
    ///
    /// # Errors
    ///
    /// Returns [`MitServiceError::Repository`] when the query fails.
    pub async fn find_all(&self) -> MitServiceResult<Vec<Mit>> {
        let result: MitRepositoryResult<Vec<Mit>> = self.repository.list_all().await;
        Ok(result?)
    }

    /// Returns the MITs for one date, ordered by `order` ascending.
    ///
    /// # Errors
    ///
    /// Returns [`MitServiceError::Repository`] when the query fails.
    pub async fn find_by_date(&self, date: MitDate) -> MitServiceResult<Vec<Mit>> {
        let result: MitRepositoryResult<Vec<Mit>> = self.repository.list_for_date(date).await;
        Ok(result?)
    }

    /// Applies a partial update to a MIT.
    ///
    /// No business rules are re-validated; in particular a changed date is
    /// accepted even when it lies in the past or its partition is full.
    /// Returns `Ok(None)` when no record matched the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`MitServiceError::Repository`] when persistence fails.
    pub async fn update(&self, id: MitId, changes: MitChanges) -> MitServiceResult<Option<Mit>> {
        let result = self.repository.update(id, changes).await;
        Ok(result?)
    }

    /// Removes a MIT.
    ///
    /// Returns `Ok(None)` when no record matched the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`MitServiceError::Repository`] when persistence fails.
    pub async fn delete(&self, id: MitId) -> MitServiceResult<Option<Mit>> {
        let result = self.repository.delete(id).await;
        Ok(result?)
    }
}

/// Next sequential order for a date partition: one above the highest
/// existing order, or 1 when the partition is empty (gaps are ignored).
fn next_order(existing: &[Mit]) -> i32 {
    existing
        .iter()
        .map(Mit::order)
        .max()
        .map_or(1, |highest| highest.saturating_add(1))
}

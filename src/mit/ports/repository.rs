//! Repository port for MIT persistence and range queries.

use crate::mit::domain::{Mit, MitChanges, MitDate, MitId, NewMit};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for MIT repository operations.
pub type MitRepositoryResult<T> = Result<T, MitRepositoryError>;

/// Fully resolved range/filter query executed by a repository.
///
/// Bounds are inclusive; absent bounds leave that side of the range open.
/// The service resolves defaulting policy (today when both bounds are
/// absent, limit clamping) before a query reaches the port, so adapters
/// execute it mechanically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MitQuery {
    /// Inclusive lower bound on the date, if any.
    pub start_date: Option<MitDate>,
    /// Inclusive upper bound on the date, if any.
    pub end_date: Option<MitDate>,
    /// Exact-match completion filter, if any; ANDed with the date range.
    pub completed: Option<bool>,
    /// Maximum number of rows to return.
    pub limit: i64,
}

/// MIT persistence contract.
///
/// Adapters assign identity and timestamps at insert time and refresh
/// `updated_at` on every update. Rows returned by [`Self::query`] are
/// ordered by date descending then order ascending; the list operations
/// order by `order` ascending only.
#[async_trait]
pub trait MitRepository: Send + Sync {
    /// Stores a new MIT and returns the persisted record.
    ///
    /// # Errors
    ///
    /// Returns [`MitRepositoryError::Persistence`] when the engine rejects
    /// the insert.
    async fn insert(&self, draft: NewMit) -> MitRepositoryResult<Mit>;

    /// Returns every stored MIT, ordered by `order` ascending.
    async fn list_all(&self) -> MitRepositoryResult<Vec<Mit>>;

    /// Returns the MITs for exactly one date, ordered by `order` ascending.
    async fn list_for_date(&self, date: MitDate) -> MitRepositoryResult<Vec<Mit>>;

    /// Executes a resolved range/filter query.
    ///
    /// Results are ordered by date descending, then `order` ascending
    /// within each date, and truncated to the query limit.
    async fn query(&self, query: MitQuery) -> MitRepositoryResult<Vec<Mit>>;

    /// Applies a partial update and returns the updated record.
    ///
    /// Returns `None` when no row matched the identifier; `updated_at` is
    /// refreshed on every match.
    async fn update(&self, id: MitId, changes: MitChanges) -> MitRepositoryResult<Option<Mit>>;

    /// Removes a MIT and returns the removed record.
    ///
    /// Returns `None` when no row matched the identifier.
    async fn delete(&self, id: MitId) -> MitRepositoryResult<Option<Mit>>;
}

/// Errors returned by MIT repository implementations.
#[derive(Debug, Clone, Error)]
pub enum MitRepositoryError {
    /// Persistence-layer failure, propagated unchanged.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MitRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

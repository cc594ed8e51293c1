//! Thread-safe in-memory MIT repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::mit::{
    domain::{Mit, MitChanges, MitDate, MitId, NewMit, PersistedMitData},
    ports::{MitQuery, MitRepository, MitRepositoryError, MitRepositoryResult},
};

/// In-memory MIT repository mirroring the SQLite adapter's semantics:
/// identity and timestamps assigned at insert, `updated_at` refreshed on
/// every update, and the same result ordering for every operation.
pub struct InMemoryMitRepository<C> {
    state: Arc<RwLock<HashMap<MitId, Mit>>>,
    clock: Arc<C>,
}

impl<C> InMemoryMitRepository<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }
}

impl<C> Clone for InMemoryMitRepository<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

fn lock_error(message: impl ToString) -> MitRepositoryError {
    MitRepositoryError::persistence(std::io::Error::other(message.to_string()))
}

fn matches_query(mit: &Mit, query: &MitQuery) -> bool {
    let after_start = query.start_date.is_none_or(|start| mit.date() >= start);
    let before_end = query.end_date.is_none_or(|end| mit.date() <= end);
    let completion = query.completed.is_none_or(|flag| mit.completed() == flag);
    after_start && before_end && completion
}

fn apply_changes(existing: &Mit, changes: MitChanges, updated_at: DateTime<Utc>) -> Mit {
    Mit::from_persisted(PersistedMitData {
        id: existing.id(),
        description: changes
            .description
            .unwrap_or_else(|| existing.description().to_owned()),
        completed: changes.completed.unwrap_or_else(|| existing.completed()),
        order: changes.order.unwrap_or_else(|| existing.order()),
        date: changes.date.unwrap_or_else(|| existing.date()),
        created_at: existing.created_at(),
        updated_at,
    })
}

#[async_trait]
impl<C> MitRepository for InMemoryMitRepository<C>
where
    C: Clock + Send + Sync,
{
    async fn insert(&self, draft: NewMit) -> MitRepositoryResult<Mit> {
        let now = self.clock.utc();
        let mit = Mit::from_persisted(PersistedMitData {
            id: MitId::new(),
            description: draft.description,
            completed: false,
            order: draft.order,
            date: draft.date,
            created_at: now,
            updated_at: now,
        });

        let mut state = self.state.write().map_err(lock_error)?;
        state.insert(mit.id(), mit.clone());
        Ok(mit)
    }

    async fn list_all(&self) -> MitRepositoryResult<Vec<Mit>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut mits: Vec<Mit> = state.values().cloned().collect();
        mits.sort_by_key(Mit::order);
        Ok(mits)
    }

    async fn list_for_date(&self, date: MitDate) -> MitRepositoryResult<Vec<Mit>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut mits: Vec<Mit> = state
            .values()
            .filter(|mit| mit.date() == date)
            .cloned()
            .collect();
        mits.sort_by_key(Mit::order);
        Ok(mits)
    }

    async fn query(&self, query: MitQuery) -> MitRepositoryResult<Vec<Mit>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut mits: Vec<Mit> = state
            .values()
            .filter(|mit| matches_query(mit, &query))
            .cloned()
            .collect();
        mits.sort_by(|a, b| {
            b.date()
                .cmp(&a.date())
                .then_with(|| a.order().cmp(&b.order()))
        });
        mits.truncate(usize::try_from(query.limit).unwrap_or_default());
        Ok(mits)
    }

    async fn update(&self, id: MitId, changes: MitChanges) -> MitRepositoryResult<Option<Mit>> {
        let now = self.clock.utc();
        let mut state = self.state.write().map_err(lock_error)?;
        let Some(existing) = state.get(&id).cloned() else {
            return Ok(None);
        };

        let updated = apply_changes(&existing, changes, now);
        state.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: MitId) -> MitRepositoryResult<Option<Mit>> {
        let mut state = self.state.write().map_err(lock_error)?;
        Ok(state.remove(&id))
    }
}

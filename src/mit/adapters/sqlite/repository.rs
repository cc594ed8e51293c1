//! SQLite repository implementation for MIT storage.

use super::{
    models::{MitChangeset, MitRow, NewMitRow},
    schema::mits,
};
use crate::mit::{
    domain::{Mit, MitChanges, MitDate, MitId, NewMit, PersistedMitData},
    ports::{MitQuery, MitRepository, MitRepositoryError, MitRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use mockable::Clock;
use std::sync::Arc;

/// SQLite connection pool type used by MIT adapters.
///
/// The server runs it with `max_size = 1`: one shared connection, writes
/// serialized by the engine.
pub type MitSqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// SQLite-backed MIT repository.
///
/// Assigns record identity (UUIDv4) and timestamps from the injected clock
/// at insert time, and refreshes `updated_at` on every update.
pub struct SqliteMitRepository<C> {
    pool: MitSqlitePool,
    clock: Arc<C>,
}

impl<C> SqliteMitRepository<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a new repository from a connection pool and clock.
    #[must_use]
    pub const fn new(pool: MitSqlitePool, clock: Arc<C>) -> Self {
        Self { pool, clock }
    }

    async fn run_blocking<F, T>(&self, f: F) -> MitRepositoryResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> MitRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(MitRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(MitRepositoryError::persistence)?
    }
}

impl<C> Clone for SqliteMitRepository<C> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

#[async_trait]
impl<C> MitRepository for SqliteMitRepository<C>
where
    C: Clock + Send + Sync,
{
    async fn insert(&self, draft: NewMit) -> MitRepositoryResult<Mit> {
        let now = self.clock.utc();
        let new_row = NewMitRow {
            id: MitId::new().to_string(),
            description: draft.description,
            completed: false,
            order: draft.order,
            date: draft.date.into_inner(),
            created_at: now,
            updated_at: now,
        };

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(mits::table)
                .values(&new_row)
                .returning(MitRow::as_returning())
                .get_result::<MitRow>(connection)
                .map_err(MitRepositoryError::persistence)?;
            row_to_mit(row)
        })
        .await
    }

    async fn list_all(&self) -> MitRepositoryResult<Vec<Mit>> {
        self.run_blocking(|connection| {
            let rows = mits::table
                .order(mits::order.asc())
                .select(MitRow::as_select())
                .load::<MitRow>(connection)
                .map_err(MitRepositoryError::persistence)?;
            rows.into_iter().map(row_to_mit).collect()
        })
        .await
    }

    async fn list_for_date(&self, date: MitDate) -> MitRepositoryResult<Vec<Mit>> {
        self.run_blocking(move |connection| {
            let rows = mits::table
                .filter(mits::date.eq(date.into_inner()))
                .order(mits::order.asc())
                .select(MitRow::as_select())
                .load::<MitRow>(connection)
                .map_err(MitRepositoryError::persistence)?;
            rows.into_iter().map(row_to_mit).collect()
        })
        .await
    }

    async fn query(&self, query: MitQuery) -> MitRepositoryResult<Vec<Mit>> {
        self.run_blocking(move |connection| {
            let mut statement = mits::table.select(MitRow::as_select()).into_boxed();
            if let Some(start_date) = query.start_date {
                statement = statement.filter(mits::date.ge(start_date.into_inner()));
            }
            if let Some(end_date) = query.end_date {
                statement = statement.filter(mits::date.le(end_date.into_inner()));
            }
            if let Some(completed) = query.completed {
                statement = statement.filter(mits::completed.eq(completed));
            }

            let rows = statement
                .order((mits::date.desc(), mits::order.asc()))
                .limit(query.limit)
                .load::<MitRow>(connection)
                .map_err(MitRepositoryError::persistence)?;
            rows.into_iter().map(row_to_mit).collect()
        })
        .await
    }

    async fn update(&self, id: MitId, changes: MitChanges) -> MitRepositoryResult<Option<Mit>> {
        let changeset = MitChangeset {
            description: changes.description,
            completed: changes.completed,
            order: changes.order,
            date: changes.date.map(MitDate::into_inner),
            updated_at: self.clock.utc(),
        };
        let id_text = id.to_string();

        self.run_blocking(move |connection| {
            let row = diesel::update(mits::table.filter(mits::id.eq(id_text)))
                .set(&changeset)
                .returning(MitRow::as_returning())
                .get_result::<MitRow>(connection)
                .optional()
                .map_err(MitRepositoryError::persistence)?;
            row.map(row_to_mit).transpose()
        })
        .await
    }

    async fn delete(&self, id: MitId) -> MitRepositoryResult<Option<Mit>> {
        let id_text = id.to_string();

        self.run_blocking(move |connection| {
            let row = diesel::delete(mits::table.filter(mits::id.eq(id_text)))
                .returning(MitRow::as_returning())
                .get_result::<MitRow>(connection)
                .optional()
                .map_err(MitRepositoryError::persistence)?;
            row.map(row_to_mit).transpose()
        })
        .await
    }
}

fn row_to_mit(row: MitRow) -> MitRepositoryResult<Mit> {
    let MitRow {
        id,
        description,
        completed,
        order,
        date,
        created_at,
        updated_at,
    } = row;

    let parsed_id = MitId::parse(&id).map_err(MitRepositoryError::persistence)?;

    Ok(Mit::from_persisted(PersistedMitData {
        id: parsed_id,
        description,
        completed,
        order,
        date: MitDate::from_naive(date),
        created_at,
        updated_at,
    }))
}

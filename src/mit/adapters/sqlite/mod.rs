//! SQLite adapters for MIT persistence.

mod models;
mod repository;
mod schema;

pub use repository::{MitSqlitePool, SqliteMitRepository};

use diesel::QueryResult;
use diesel::connection::SimpleConnection;
use diesel::sqlite::SqliteConnection;

/// Schema SQL applied at startup. The statements are idempotent, so the
/// file can be replayed against an already-migrated database.
const CREATE_SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-08-06-000000_create_mits/up.sql");

/// Applies the embedded schema migrations to an open connection.
///
/// # Errors
///
/// Returns the underlying Diesel error when a statement fails.
pub fn apply_migrations(connection: &mut SqliteConnection) -> QueryResult<()> {
    connection.batch_execute(CREATE_SCHEMA_SQL)
}

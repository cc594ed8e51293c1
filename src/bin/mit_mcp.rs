//! MIT MCP server binary.
//!
//! Speaks the Model Context Protocol over stdio: stdout carries the
//! protocol stream, so all logging goes to stderr. The database file lives
//! under the platform data directory unless `DATABASE_PATH` overrides it,
//! and `MAX_MITS_PER_DAY` configures the daily creation cap.

use anyhow::Context;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use mit_mcp::config::ServerConfig;
use mit_mcp::mit::adapters::sqlite::{SqliteMitRepository, apply_migrations};
use mit_mcp::mit::services::MitService;
use mit_mcp::server::MitToolServer;
use mockable::DefaultClock;
use rmcp::ServiceExt;
use rmcp::transport::io::stdio;
use std::fs;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ServerConfig::from_env().context("failed to resolve server configuration")?;
    if let Some(parent) = config.database_path.parent() {
        fs::create_dir_all(parent).context("failed to create the database directory")?;
    }
    tracing::info!(
        path = %config.database_path.display(),
        daily_limit = config.daily_limit,
        "opening MIT database"
    );

    let manager = ConnectionManager::<SqliteConnection>::new(config.database_path.to_string_lossy());
    let pool = Pool::builder()
        .max_size(1)
        .build(manager)
        .context("failed to open the database")?;
    {
        let mut connection = pool
            .get()
            .context("failed to acquire a database connection")?;
        apply_migrations(&mut connection).context("database migration failed")?;
    }
    tracing::info!("database migrations applied");

    let repository = Arc::new(SqliteMitRepository::new(pool, Arc::new(DefaultClock)));
    let service =
        MitService::new(repository, Arc::new(DefaultClock)).with_daily_limit(config.daily_limit);
    let server = MitToolServer::new(service);

    tracing::info!("MIT MCP server starting on stdio transport");
    let running = server
        .serve(stdio())
        .await
        .context("failed to start the MCP server")?;
    running
        .waiting()
        .await
        .context("MCP server terminated abnormally")?;
    tracing::info!("MIT MCP server stopped");

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

//! MIT MCP server: date-partitioned "Most Important Task" tracking exposed
//! over the Model Context Protocol.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business values and rules with no infrastructure
//!   dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: Concrete implementations of ports (SQLite, in-memory)
//!
//! # Modules
//!
//! - [`mit`]: MIT domain, persistence, and the tracking service
//! - [`server`]: MCP tool handlers over the stdio transport
//! - [`config`]: environment-derived server configuration

pub mod config;
pub mod mit;
pub mod server;

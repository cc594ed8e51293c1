//! Port contracts for MIT persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by the MIT service.

pub mod repository;

pub use repository::{MitQuery, MitRepository, MitRepositoryError, MitRepositoryResult};

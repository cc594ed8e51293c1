//! Most Important Task (MIT) tracking.
//!
//! This module implements the task core: creating date-partitioned MIT
//! records under the past-date and daily-cap rules, answering range/filter
//! queries with a fixed ordering policy, and passing partial updates and
//! deletes through to persistence. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

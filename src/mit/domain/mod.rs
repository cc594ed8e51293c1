//! Domain model for Most Important Task tracking.
//!
//! The MIT domain models date-partitioned task records, the validated
//! calendar-date value they are partitioned by, and the drafts and partial
//! changesets that flow between the service and its persistence port, while
//! keeping all infrastructure concerns outside of the domain boundary.

mod date;
mod error;
mod ids;
mod mit;

pub use date::MitDate;
pub use error::MitDomainError;
pub use ids::MitId;
pub use mit::{Mit, MitChanges, NewMit, PersistedMitData};

//! Application service for MIT tracking.

mod mits;

pub use mits::{
    CreateMitRequest, DEFAULT_DAILY_LIMIT, DEFAULT_FIND_LIMIT, MAX_FIND_LIMIT, MitFilter,
    MitService, MitServiceError, MitServiceResult,
};

//! MCP transport layer exposing the MIT service as protocol tools.
//!
//! The handlers translate tool parameters into service calls and service
//! results into text content envelopes: pretty-printed JSON on success, an
//! error-flagged envelope carrying the rule-violation message, and a
//! distinct "not found" envelope when an update or delete matched nothing.

mod tools;

pub use tools::{
    CreateMitParams, DeleteMitParams, FindMitsParams, ListMitsParams, MitToolServer,
    ServerMitService, UpdateMitParams,
};

//! Unit and service-level tests for MIT tracking.

mod service_tests;

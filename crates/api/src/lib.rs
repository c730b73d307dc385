//! HTTP glue for response envelopes.
//!
//! Exposes the building blocks (config, error handling, envelope rendering,
//! routes) so integration tests and the binary entrypoint can both use them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;

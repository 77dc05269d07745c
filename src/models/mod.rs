//! Data models representing database entities.

/// Account model and request/response bodies
pub mod account;

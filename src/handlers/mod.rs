//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (raw body, URL params)
//! 2. Validates input and calls the account store
//! 3. Returns a JSON response with a status code

/// Account CRUD endpoints
pub mod accounts;
/// Health check endpoint
pub mod health;

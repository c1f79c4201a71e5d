//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, headers, etc.)
//! 2. Performs business logic (store calls, validation)
//! 3. Returns HTTP response (JSON, status code)

/// Feedback ingestion endpoint
pub mod feedbacks;
/// Service health endpoint
pub mod health;
/// API key management endpoints
pub mod keys;

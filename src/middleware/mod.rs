//! HTTP middleware components.
//!
//! Middleware are functions that run before route handlers. They can
//! authenticate requests, modify the request or response, or short-circuit
//! a request entirely (e.g. reject an unauthorized submission).

/// API key authentication middleware
pub mod auth;

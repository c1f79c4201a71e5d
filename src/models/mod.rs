//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables,
//! plus the request/response types exchanged over HTTP.

/// API key credential model
pub mod api_key;
/// Feedback record and submission types
pub mod feedback;
/// Tenant (company account) model
pub mod tenant;

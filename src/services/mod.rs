//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They handle validation, credential rotation, and persistence rules.

pub mod feedback_service;
pub mod key_service;

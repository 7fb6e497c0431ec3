//! HTTP request handlers.

/// Liveness endpoint.
pub mod health;
/// Paste creation and retrieval endpoints.
pub mod paste;

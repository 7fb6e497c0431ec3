//! Core domain library for PasteLite (config, storage, models, paste lifecycle).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants.
pub mod constants;
/// Paste stores (redb-backed and in-memory).
pub mod db;
/// Environment mutation helpers.
pub mod env;
/// Application error types (storage/domain).
pub mod error;
/// Paste creation and view consumption rules.
pub mod lifecycle;
/// Data models for API requests and persistence.
pub mod models;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use constants::{DEFAULT_CLI_SERVER_URL, DEFAULT_MAX_PASTE_SIZE, DEFAULT_PORT};
pub use db::{Database, MemoryStore, PasteDb, PasteStore};
pub use error::AppError;
pub use lifecycle::PasteLifecycle;
pub use models::paste::{Paste, PasteState};

//! Data models shared by storage and the API layer.

/// Paste records, derived lifecycle state, and API payloads.
pub mod paste;

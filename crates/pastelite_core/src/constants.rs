//! Shared constants used across PasteLite crates.

/// Default API port for PasteLite.
pub const DEFAULT_PORT: u16 = 38421;

/// Default maximum paste size accepted by the API layer.
pub const DEFAULT_MAX_PASTE_SIZE: usize = 1024 * 1024;

/// Default base URL for CLI/API clients.
pub const DEFAULT_CLI_SERVER_URL: &str = "http://127.0.0.1:38421";

/// Header carrying a caller-supplied clock (epoch millis) when test mode is on.
pub const TEST_NOW_HEADER: &str = "x-test-now-ms";

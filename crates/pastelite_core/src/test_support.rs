//! Shared test-only helpers for pastelite_core.

use crate::{Database, PasteLifecycle, PasteDb};
use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

/// Creates an isolated temporary database and returns it with the temp dir.
///
/// Keep the [`TempDir`] alive for the full test to preserve the backing files.
///
/// # Panics
/// Panics if temp-dir creation, path conversion, or database initialization
/// fails in the test environment.
pub(crate) fn setup_temp_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("db");
    let db = Database::new(db_path.to_str().expect("db path")).expect("db");
    (db, temp_dir)
}

/// Lifecycle manager over a fresh temporary redb store.
pub(crate) fn setup_redb_lifecycle() -> (PasteLifecycle<PasteDb>, TempDir) {
    let (db, temp_dir) = setup_temp_db();
    (PasteLifecycle::new(db.pastes), temp_dir)
}

/// Fixed reference instant so tests never depend on the wall clock.
pub(crate) fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

//! Paste storage: the [`PasteStore`] contract and its implementations.

/// In-memory store with per-paste locking.
pub mod memory;
/// redb-backed paste store.
pub mod paste;
/// redb table definitions.
pub mod tables;

pub use memory::MemoryStore;
pub use paste::PasteDb;

use crate::error::AppError;
use crate::models::paste::Paste;
use std::path::Path;
use std::sync::Arc;

/// Durable mapping from paste id to paste row.
///
/// `update` is the only mutation path used after creation. Implementations
/// must run the read, the closure, and the write as one atomic step per paste:
/// two concurrent `update` calls on the same id never observe the same
/// starting row.
pub trait PasteStore: Send + Sync {
    /// Insert or replace the full row for `paste.id`.
    ///
    /// # Returns
    /// The row as persisted.
    ///
    /// # Errors
    /// Returns an error when serialization or storage fails.
    fn save(&self, paste: &Paste) -> Result<Paste, AppError>;

    /// Look up a row by id.
    ///
    /// # Returns
    /// `Ok(Some(paste))` when found, `Ok(None)` when missing.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    fn find_by_id(&self, id: &str) -> Result<Option<Paste>, AppError>;

    /// Atomically read, modify, and write back the row for `id`.
    ///
    /// If `apply` returns an error nothing is written and that error is
    /// returned unchanged.
    ///
    /// # Returns
    /// `Ok(Some(updated))` on success, `Ok(None)` when `id` is missing.
    ///
    /// # Errors
    /// Propagates errors from `apply`, serialization, or storage.
    fn update<F>(&self, id: &str, apply: F) -> Result<Option<Paste>, AppError>
    where
        F: FnOnce(&mut Paste) -> Result<(), AppError>;
}

impl<S: PasteStore + ?Sized> PasteStore for Arc<S> {
    fn save(&self, paste: &Paste) -> Result<Paste, AppError> {
        (**self).save(paste)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Paste>, AppError> {
        (**self).find_by_id(id)
    }

    fn update<F>(&self, id: &str, apply: F) -> Result<Option<Paste>, AppError>
    where
        F: FnOnce(&mut Paste) -> Result<(), AppError>,
    {
        (**self).update(id, apply)
    }
}

/// Database handle with access to the underlying redb tables.
pub struct Database {
    pub db: Arc<redb::Database>,
    pub pastes: PasteDb,
}

impl Database {
    /// Build a database handle from an existing shared redb instance.
    ///
    /// # Returns
    /// A new [`Database`] wrapper that shares the underlying redb instance.
    ///
    /// # Errors
    /// Returns an error if the required tables cannot be opened.
    pub fn from_shared(db: Arc<redb::Database>) -> Result<Self, AppError> {
        Ok(Self {
            pastes: PasteDb::new(db.clone())?,
            db,
        })
    }

    /// Clone this handle for another subsystem in the same process.
    ///
    /// redb holds an exclusive file lock, so a second open of the same path
    /// would fail; sharing the instance avoids that.
    ///
    /// # Errors
    /// Returns an error if table initialization fails.
    pub fn share(&self) -> Result<Self, AppError> {
        Self::from_shared(self.db.clone())
    }

    /// Open (or create) the database under directory `path`.
    ///
    /// The redb file lives at `<path>/data.redb`.
    ///
    /// # Returns
    /// A fully initialized [`Database`].
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or redb fails to
    /// open the file.
    pub fn new(path: &str) -> Result<Self, AppError> {
        let dir = Path::new(path);
        std::fs::create_dir_all(dir).map_err(|err| {
            AppError::StorageMessage(format!(
                "Failed to create database directory '{}': {}",
                dir.display(),
                err
            ))
        })?;

        let file = dir.join(tables::REDB_FILE_NAME);
        let db = redb::Database::create(&file)?;
        tracing::debug!("Opened paste database at {}", file.display());
        Self::from_shared(Arc::new(db))
    }
}

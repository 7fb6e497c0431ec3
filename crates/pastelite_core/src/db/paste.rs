//! Paste storage operations backed by redb.

use super::PasteStore;
use crate::{db::tables::PASTES, error::AppError, models::paste::Paste};
use redb::{ReadableDatabase, ReadableTable};
use std::sync::Arc;

fn deserialize_paste(bytes: &[u8]) -> Result<Paste, AppError> {
    Ok(bincode::deserialize(bytes)?)
}

/// Accessor for the paste table.
///
/// Every write runs in its own redb write transaction. redb admits one writer
/// at a time, so [`PasteStore::update`] is atomic across threads and across
/// every [`PasteDb`] sharing the same database.
#[derive(Clone)]
pub struct PasteDb {
    db: Arc<redb::Database>,
}

impl PasteDb {
    /// Initialize the paste table if it does not exist yet.
    ///
    /// # Returns
    /// A new [`PasteDb`] accessor bound to `db`.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, AppError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(PASTES)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    /// Number of stored rows, live or not.
    ///
    /// # Errors
    /// Returns an error when storage access fails.
    pub fn len(&self) -> Result<u64, AppError> {
        let read_txn = self.db.begin_read()?;
        let pastes = read_txn.open_table(PASTES)?;
        let mut count = 0;
        for item in pastes.iter()? {
            item?;
            count += 1;
        }
        Ok(count)
    }

    /// Whether the table holds no rows.
    ///
    /// # Errors
    /// Returns an error when storage access fails.
    pub fn is_empty(&self) -> Result<bool, AppError> {
        Ok(self.len()? == 0)
    }
}

impl PasteStore for PasteDb {
    fn save(&self, paste: &Paste) -> Result<Paste, AppError> {
        let encoded = bincode::serialize(paste)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut pastes = write_txn.open_table(PASTES)?;
            pastes.insert(paste.id.as_str(), encoded.as_slice())?;
        }
        write_txn.commit()?;
        Ok(paste.clone())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Paste>, AppError> {
        let read_txn = self.db.begin_read()?;
        let pastes = read_txn.open_table(PASTES)?;
        match pastes.get(id)? {
            Some(value) => Ok(Some(deserialize_paste(value.value())?)),
            None => Ok(None),
        }
    }

    fn update<F>(&self, id: &str, apply: F) -> Result<Option<Paste>, AppError>
    where
        F: FnOnce(&mut Paste) -> Result<(), AppError>,
    {
        let write_txn = self.db.begin_write()?;
        let updated = {
            let mut pastes = write_txn.open_table(PASTES)?;

            let Some(old_guard) = pastes.get(id)? else {
                return Ok(None);
            };
            let mut paste = deserialize_paste(old_guard.value())?;
            drop(old_guard);

            // Returning early drops the uncommitted transaction, which aborts it.
            apply(&mut paste)?;

            let encoded = bincode::serialize(&paste)?;
            pastes.insert(id, encoded.as_slice())?;
            paste
        };
        write_txn.commit()?;
        Ok(Some(updated))
    }
}

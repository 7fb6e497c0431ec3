//! In-memory paste store.

use super::PasteStore;
use crate::{error::AppError, models::paste::Paste};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

type Slot = Arc<Mutex<Paste>>;

fn poisoned() -> AppError {
    AppError::StorageMessage("In-memory paste store lock is poisoned".to_string())
}

fn lock_slot(slot: &Slot) -> Result<MutexGuard<'_, Paste>, AppError> {
    slot.lock().map_err(|_| poisoned())
}

/// Paste store kept in process memory.
///
/// The outer map lock is held only long enough to find or insert a slot.
/// Each paste has its own mutex, so updates to different ids never wait on
/// each other while updates to the same id are serialized.
#[derive(Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<String, Slot>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, id: &str) -> Result<Option<Slot>, AppError> {
        let slots = self.slots.read().map_err(|_| poisoned())?;
        Ok(slots.get(id).cloned())
    }

    /// Number of stored rows, live or not.
    pub fn len(&self) -> usize {
        self.slots.read().map(|slots| slots.len()).unwrap_or(0)
    }

    /// Whether the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PasteStore for MemoryStore {
    fn save(&self, paste: &Paste) -> Result<Paste, AppError> {
        if let Some(slot) = self.slot(&paste.id)? {
            *lock_slot(&slot)? = paste.clone();
            return Ok(paste.clone());
        }

        let mut slots = self.slots.write().map_err(|_| poisoned())?;
        // Another writer may have inserted the id since the read above.
        let slot = slots
            .entry(paste.id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(paste.clone())));
        *lock_slot(slot)? = paste.clone();
        Ok(paste.clone())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Paste>, AppError> {
        match self.slot(id)? {
            Some(slot) => Ok(Some(lock_slot(&slot)?.clone())),
            None => Ok(None),
        }
    }

    fn update<F>(&self, id: &str, apply: F) -> Result<Option<Paste>, AppError>
    where
        F: FnOnce(&mut Paste) -> Result<(), AppError>,
    {
        let Some(slot) = self.slot(id)? else {
            return Ok(None);
        };
        let mut current = lock_slot(&slot)?;
        let mut working = current.clone();
        apply(&mut working)?;
        *current = working.clone();
        Ok(Some(working))
    }
}

//! Paste creation and view consumption.
//!
//! [`PasteLifecycle`] owns every business rule about pastes: content
//! validation, TTL computation, and the expiry/view-limit checks performed on
//! each read. It holds no state between calls beyond its store handle.

use crate::db::PasteStore;
use crate::error::AppError;
use crate::models::paste::{Paste, PasteState};
use chrono::{DateTime, Duration, Utc};

/// Creates pastes and consumes views against a [`PasteStore`].
pub struct PasteLifecycle<S> {
    store: S,
}

fn validate_content(content: &str) -> Result<(), AppError> {
    if content.trim().is_empty() {
        return Err(AppError::InvalidContent(
            "Content cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Compute `expires_at` for a requested TTL.
///
/// Non-positive TTLs are accepted and mean "no expiry".
fn expiry_for(
    created_at: DateTime<Utc>,
    ttl_seconds: Option<i64>,
) -> Result<Option<DateTime<Utc>>, AppError> {
    let Some(ttl) = ttl_seconds.filter(|ttl| *ttl > 0) else {
        return Ok(None);
    };
    Duration::try_seconds(ttl)
        .and_then(|ttl| created_at.checked_add_signed(ttl))
        .map(Some)
        .ok_or_else(|| AppError::BadRequest(format!("ttl_seconds {} is out of range", ttl)))
}

fn consume_view(paste: &mut Paste, now: DateTime<Utc>) -> Result<(), AppError> {
    match paste.state_at(now) {
        PasteState::Live => {
            // An unlimited paste that has hit the counter ceiling cannot record
            // another view, so it behaves as exhausted.
            paste.view_count = paste
                .view_count
                .checked_add(1)
                .ok_or(AppError::ViewLimitExceeded)?;
            Ok(())
        }
        PasteState::Expired => Err(AppError::Expired),
        PasteState::Exhausted => Err(AppError::ViewLimitExceeded),
    }
}

impl<S: PasteStore> PasteLifecycle<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create and persist a paste stamped with the current time.
    ///
    /// # Arguments
    /// - `content`: Paste body; must contain a non-whitespace character.
    /// - `ttl_seconds`: Lifetime in seconds; `None` or `<= 0` never expires.
    /// - `max_views`: Successful fetches allowed; `None` is unlimited.
    ///
    /// # Returns
    /// The stored paste with `view_count == 0`.
    ///
    /// # Errors
    /// [`AppError::InvalidContent`] for blank content,
    /// [`AppError::BadRequest`] for a TTL that overflows the clock, or any
    /// storage error.
    pub fn create(
        &self,
        content: String,
        ttl_seconds: Option<i64>,
        max_views: Option<u32>,
    ) -> Result<Paste, AppError> {
        self.create_at(content, ttl_seconds, max_views, Utc::now())
    }

    /// Same as [`Self::create`] with an explicit creation instant.
    pub fn create_at(
        &self,
        content: String,
        ttl_seconds: Option<i64>,
        max_views: Option<u32>,
        now: DateTime<Utc>,
    ) -> Result<Paste, AppError> {
        validate_content(&content)?;
        let expires_at = expiry_for(now, ttl_seconds)?;
        let paste = Paste::new(content, now, expires_at, max_views);
        let saved = self.store.save(&paste)?;
        tracing::debug!(
            paste_id = %saved.id,
            expires_at = ?saved.expires_at,
            max_views = ?saved.max_views,
            size = saved.content.len(),
            "created paste"
        );
        Ok(saved)
    }

    /// Record one view of paste `id` as of `now`.
    ///
    /// Checks run in order (missing, expired, out of views) and the first
    /// failure is returned without writing anything. The check and the
    /// increment happen inside one [`PasteStore::update`], so two racing
    /// fetches on a paste with one view left cannot both succeed.
    ///
    /// # Returns
    /// The paste after its `view_count` was incremented.
    ///
    /// # Errors
    /// [`AppError::NotFound`], [`AppError::Expired`], or
    /// [`AppError::ViewLimitExceeded`], or any storage error.
    pub fn fetch(&self, id: &str, now: DateTime<Utc>) -> Result<Paste, AppError> {
        let result = self
            .store
            .update(id, |paste| consume_view(paste, now))
            .and_then(|updated| updated.ok_or(AppError::NotFound));

        match &result {
            Ok(paste) => tracing::debug!(
                paste_id = %paste.id,
                view_count = paste.view_count,
                "recorded paste view"
            ),
            Err(err) if err.is_not_found_class() => {
                tracing::debug!(paste_id = %id, reason = %err, "refused paste fetch")
            }
            Err(err) => tracing::error!(paste_id = %id, "paste fetch failed: {}", err),
        }
        result
    }

    /// Derive the lifecycle state of paste `id` at `now` without consuming a view.
    ///
    /// # Errors
    /// [`AppError::NotFound`] when the paste does not exist, or any storage error.
    pub fn state_of(&self, id: &str, now: DateTime<Utc>) -> Result<PasteState, AppError> {
        self.store
            .find_by_id(id)?
            .map(|paste| paste.state_at(now))
            .ok_or(AppError::NotFound)
    }
}

//! Paste records and their derived lifecycle state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Paste row stored in the database.
///
/// Everything except `view_count` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paste {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_views: Option<u32>,
    pub view_count: u32,
}

/// Lifecycle state of a paste at a given instant.
///
/// Never persisted; always derived from the paste fields and the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PasteState {
    /// Readable: not past `expires_at` and views remain.
    Live,
    /// `now` is strictly after `expires_at`.
    Expired,
    /// `view_count` reached `max_views`.
    Exhausted,
}

impl PasteState {
    /// Derive the state from raw lifecycle fields.
    ///
    /// Expiry is checked before the view limit, so a paste that is both past
    /// its deadline and out of views reports [`PasteState::Expired`].
    pub fn evaluate(
        now: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
        view_count: u32,
        max_views: Option<u32>,
    ) -> Self {
        if expires_at.is_some_and(|deadline| now > deadline) {
            return Self::Expired;
        }
        if max_views.is_some_and(|max| view_count >= max) {
            return Self::Exhausted;
        }
        Self::Live
    }

    /// Whether a fetch may succeed in this state.
    pub fn is_live(self) -> bool {
        self == Self::Live
    }
}

impl Paste {
    /// Create a paste with a fresh random id and zero views.
    ///
    /// Content validation lives in [`crate::PasteLifecycle::create`]; this
    /// constructor only assembles the row.
    pub fn new(
        content: String,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
        max_views: Option<u32>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content,
            created_at,
            expires_at,
            max_views,
            view_count: 0,
        }
    }

    /// Lifecycle state of this paste at `now`.
    pub fn state_at(&self, now: DateTime<Utc>) -> PasteState {
        PasteState::evaluate(now, self.expires_at, self.view_count, self.max_views)
    }

    /// Views left before the paste is exhausted, or `None` when unlimited.
    pub fn remaining_views(&self) -> Option<u32> {
        self.max_views
            .map(|max| max.saturating_sub(self.view_count))
    }
}

/// Request payload for creating a paste.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePasteRequest {
    pub content: String,
    /// Lifetime in seconds. Zero or negative values mean "never expires".
    pub ttl_seconds: Option<i64>,
    pub max_views: Option<u32>,
}

/// Response body returned after creating a paste.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePasteResponse {
    pub id: String,
    pub url: String,
}

/// Client-facing view of a paste after a successful fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasteView {
    pub content: String,
    pub remaining_views: Option<u32>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<&Paste> for PasteView {
    fn from(value: &Paste) -> Self {
        Self {
            content: value.content.clone(),
            remaining_views: value.remaining_views(),
            expires_at: value.expires_at,
        }
    }
}

//! Paste HTTP handlers.

use crate::{error::HttpError, AppError, AppState};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use chrono::{DateTime, Utc};
use pastelite_core::constants::TEST_NOW_HEADER;
use pastelite_core::models::paste::{CreatePasteRequest, CreatePasteResponse, PasteView};

/// Run a store-bound closure on the blocking pool.
async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|err| {
        tracing::error!("Blocking paste task failed: {}", err);
        AppError::Internal
    })?
}

/// Resolve the instant used for lifecycle checks.
///
/// The `x-test-now-ms` header is only honored in test mode; otherwise, and
/// for malformed values, the wall clock is used.
pub(crate) fn request_now(headers: &HeaderMap, test_mode: bool) -> DateTime<Utc> {
    if !test_mode {
        return Utc::now();
    }
    headers
        .get(TEST_NOW_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<i64>().ok())
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or_else(Utc::now)
}

/// Base URL for share links: configured value, else derived from `Host`.
pub(crate) fn share_base_url(configured: Option<&str>, headers: &HeaderMap) -> String {
    if let Some(base) = configured {
        return base.to_string();
    }
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .unwrap_or("localhost");
    format!("http://{}", host)
}

/// Create a new paste.
///
/// # Arguments
/// - `state`: Application state.
/// - `headers`: Request headers, used to build the share URL.
/// - `payload`: Paste creation payload.
///
/// # Returns
/// `201 Created` with the new id and its share URL.
///
/// # Errors
/// Returns `400` for malformed bodies, blank or oversized content, and `500`
/// when persistence fails.
pub async fn create_paste(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreatePasteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatePasteResponse>), HttpError> {
    let Json(req) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    if req.content.len() > state.config.max_paste_size {
        return Err(AppError::BadRequest(format!(
            "Paste size exceeds maximum of {} bytes",
            state.config.max_paste_size
        ))
        .into());
    }

    let lifecycle = state.lifecycle.clone();
    let paste = run_blocking(move || lifecycle.create(req.content, req.ttl_seconds, req.max_views))
        .await?;

    let base_url = share_base_url(state.config.base_url.as_deref(), &headers);
    let url = format!("{}/api/pastes/{}", base_url, paste.id);
    tracing::info!(paste_id = %paste.id, "created paste");

    Ok((
        StatusCode::CREATED,
        Json(CreatePasteResponse { id: paste.id, url }),
    ))
}

/// Fetch a paste by id, consuming one view.
///
/// # Arguments
/// - `state`: Application state.
/// - `id`: Paste identifier from the path.
/// - `headers`: Request headers (test clock override).
///
/// # Returns
/// Content, remaining views, and expiry as JSON.
///
/// # Errors
/// Returns `404` when the paste is missing, expired, or out of views.
pub async fn fetch_paste(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<PasteView>, HttpError> {
    let now = request_now(&headers, state.config.test_mode);
    let lifecycle = state.lifecycle.clone();
    let paste = run_blocking(move || lifecycle.fetch(&id, now)).await?;
    Ok(Json(PasteView::from(&paste)))
}

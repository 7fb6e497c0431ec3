//! Liveness endpoint.

use axum::Json;
use serde_json::{json, Value};

/// Report that the server is up.
pub async fn healthz() -> Json<Value> {
    Json(json!({ "ok": true }))
}

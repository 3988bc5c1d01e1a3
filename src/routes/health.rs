//! Liveness probe.

use axum::Json;
use serde_json::{json, Value};

/// `GET /health` — always succeeds while the process is serving.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

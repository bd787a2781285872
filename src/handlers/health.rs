use axum::Json;
use serde_json::{Value, json};

// Liveness only, never touches the limiter or the upstream
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "ok": true }))
}

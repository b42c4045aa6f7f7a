use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::error::Result;
use crate::AppState;

/// Liveness probe, fails if the database is unreachable
/// GET /health
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>> {
    state.db.ping().await?;
    Ok(Json(json!({ "status": "ok" })))
}

//! API route handlers
//!
//! - `health`: Liveness and readiness probes
//! - `logpush`: The batch ingestion endpoint

pub mod health;
pub mod logpush;

use crate::error::{BridgeError, BridgeResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// Service info for the root endpoint (GET /)
pub async fn api_info() -> BridgeResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "logpush-bridge",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/logpush",
            "/health",
            "/ready"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> BridgeError {
    BridgeError::NotFound
}

use crate::decode::decode;
use crate::error::BridgeResult;
use crate::normalize::normalize;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_ENCODING;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Summary returned for every successfully processed batch
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchSummary {
    pub status: String,
    /// Candidates decoded from the request body
    pub received: usize,
    /// Entries that passed normalization and were shipped
    pub accepted: usize,
    /// Candidates dropped by the validity filter
    pub rejected: usize,
    /// Whether an outbound push was performed; false for zero-entry batches
    pub forwarded: bool,
}

/// Receive one Logpush batch: decode, normalize, and forward to Loki.
///
/// Decode failures (corrupt gzip, scalar body) are client errors; a failed
/// forward is an upstream error. A batch where every record is filtered out
/// is still a success — it is acknowledged without an outbound push so the
/// exporter does not retry it.
pub async fn receive_batch(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> BridgeResult<impl IntoResponse> {
    let content_encoding = headers
        .get(CONTENT_ENCODING)
        .and_then(|value| value.to_str().ok());

    let candidates = decode(&body, content_encoding)?;
    let received = candidates.len();

    // One snapshot per batch: every fallback timestamp in this request is
    // identical.
    let now_nanos = Utc::now().timestamp_nanos_opt().unwrap_or(0);
    let batch = normalize(candidates, now_nanos);

    let forwarded = !batch.entries.is_empty();
    if forwarded {
        state.loki.push(&batch.entries).await?;
    }

    tracing::info!(
        received,
        accepted = batch.accepted,
        rejected = batch.rejected,
        forwarded,
        "logpush batch processed"
    );

    Ok(Json(BatchSummary {
        status: "ok".to_string(),
        received,
        accepted: batch.accepted,
        rejected: batch.rejected,
        forwarded,
    }))
}

//! Normalizer — turns candidate records into timestamped log lines.
//!
//! Each [`CandidateRecord`] either becomes one [`NormalizedEntry`] or bumps
//! the rejected count; nothing here aborts a batch. Order is preserved, and
//! the wall-clock fallback timestamp is a single per-batch snapshot supplied
//! by the caller, so a batch with no embedded timestamps normalizes
//! deterministically.

use crate::decode::CandidateRecord;
use serde_json::{Map, Value};

/// Field Logpush records use for the edge request start time, as epoch
/// milliseconds. Preferred over wall-clock time when present and numeric.
pub const EVENT_TIMESTAMP_FIELD: &str = "EdgeStartTimestamp";

const NANOS_PER_MILLI: i64 = 1_000_000;

/// One log line ready for the ingestion envelope. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEntry {
    /// Nanoseconds since the Unix epoch: the record's embedded event time
    /// when recognized, otherwise the batch snapshot. Never negative.
    pub timestamp_nanos: i64,
    /// Exactly one line of text, no embedded line feeds.
    pub line: String,
}

/// Outcome of normalizing one decoded batch.
///
/// `entries.len() == accepted` and `accepted + rejected` equals the number
/// of candidates passed in. A fully-rejected batch is a valid zero-entry
/// outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedBatch {
    pub entries: Vec<NormalizedEntry>,
    pub accepted: usize,
    pub rejected: usize,
}

/// Normalize candidates into entries, preserving input order.
///
/// `now_nanos` is sampled once per batch by the caller and reused for every
/// record without a recognized event timestamp.
pub fn normalize(candidates: Vec<CandidateRecord>, now_nanos: i64) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();

    for candidate in candidates {
        let entry = match candidate {
            CandidateRecord::Structured(fields) => {
                if !has_meaningful_fields(&fields) {
                    batch.rejected += 1;
                    continue;
                }
                let timestamp_nanos = event_timestamp_nanos(&fields).unwrap_or(now_nanos);
                match serde_json::to_string(&fields) {
                    Ok(line) => NormalizedEntry {
                        timestamp_nanos,
                        line,
                    },
                    Err(_) => {
                        batch.rejected += 1;
                        continue;
                    }
                }
            }
            CandidateRecord::RawText(line) => NormalizedEntry {
                timestamp_nanos: now_nanos,
                line,
            },
        };

        // Entries must stay single-line. serde_json escapes control
        // characters and the decoder splits on line feeds, but a candidate
        // constructed elsewhere could still smuggle one in.
        if entry.line.contains('\n') {
            batch.rejected += 1;
            continue;
        }

        batch.entries.push(entry);
        batch.accepted += 1;
    }

    batch
}

/// A structured record is worth shipping only if some value carries content:
/// anything other than null or an empty string.
fn has_meaningful_fields(fields: &Map<String, Value>) -> bool {
    fields.values().any(|value| match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    })
}

/// Extract the recognized event timestamp, converted to nanoseconds.
///
/// Returns `None` for missing, non-numeric, or negative values, and when the
/// millisecond-to-nanosecond conversion would overflow; callers fall back to
/// the batch snapshot.
fn event_timestamp_nanos(fields: &Map<String, Value>) -> Option<i64> {
    let millis = match fields.get(EVENT_TIMESTAMP_FIELD)? {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float as i64))?,
        _ => return None,
    };
    if millis < 0 {
        return None;
    }
    millis.checked_mul(NANOS_PER_MILLI)
}

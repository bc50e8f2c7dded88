//! End-to-end tests for the decode → normalize pipeline
//!
//! These exercise the full body-bytes-to-entries path without the HTTP
//! layer, covering every batch shape the bridge accepts.

use flate2::write::GzEncoder;
use flate2::Compression;
use logpush_bridge::{decode, normalize, CandidateRecord, DecodeError};
use serde_json::Value;
use std::io::Write;

const NOW: i64 = 1_700_000_123_000_000_000;

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("write gzip payload");
    encoder.finish().expect("finish gzip stream")
}

fn run_pipeline(body: &[u8], encoding: Option<&str>) -> logpush_bridge::NormalizedBatch {
    let candidates = decode(body, encoding).expect("decode should succeed");
    normalize(candidates, NOW)
}

#[test]
fn json_array_body_normalizes_in_order() {
    let body = br#"[{"ClientIP": "198.51.100.1"}, {"ClientIP": "198.51.100.2"}]"#;
    let batch = run_pipeline(body, None);

    assert_eq!(batch.accepted, 2);
    assert_eq!(batch.rejected, 0);
    assert_eq!(batch.entries[0].line, r#"{"ClientIP":"198.51.100.1"}"#);
    assert_eq!(batch.entries[1].line, r#"{"ClientIP":"198.51.100.2"}"#);
}

#[test]
fn gzip_ndjson_batch_yields_one_entry_per_object_with_shared_timestamp() {
    let ndjson = b"{\"a\": 1}\n{\"b\": 2}\n{\"c\": 3}\n";
    let batch = run_pipeline(&gzip(ndjson), Some("gzip"));

    assert_eq!(batch.accepted, 3);
    assert_eq!(batch.rejected, 0);
    assert!(batch.entries.iter().all(|e| e.timestamp_nanos == NOW));
}

#[test]
fn gzip_json_array_body_is_also_accepted() {
    let body = gzip(br#"[{"event": "a"}, {"event": "b"}]"#);
    let batch = run_pipeline(&body, Some("gzip"));
    assert_eq!(batch.accepted, 2);
}

#[test]
fn embedded_timestamps_override_the_batch_snapshot() {
    let body = br#"[
        {"EdgeStartTimestamp": 1700000000000, "ClientIP": "198.51.100.1"},
        {"ClientIP": "198.51.100.2"}
    ]"#;
    let batch = run_pipeline(body, None);

    assert_eq!(batch.entries[0].timestamp_nanos, 1_700_000_000_000_000_000);
    assert_eq!(batch.entries[1].timestamp_nanos, NOW);
}

#[test]
fn mixed_ndjson_keeps_raw_text_and_drops_scalars() {
    let ndjson = b"{\"a\": 1}\nnot json at all\n42\n{\"b\": null}\n";
    let candidates = decode(&gzip(ndjson), Some("gzip")).expect("decode should succeed");

    // The scalar line is dropped at decode time; three candidates remain.
    assert_eq!(candidates.len(), 3);
    assert!(matches!(&candidates[1], CandidateRecord::RawText(line) if line == "not json at all"));

    let batch = normalize(candidates, NOW);
    // {"b": null} fails the validity filter; the raw text line never does.
    assert_eq!(batch.accepted, 2);
    assert_eq!(batch.rejected, 1);
    assert_eq!(batch.entries[1].line, "not json at all");
}

#[test]
fn single_object_body_round_trips_through_serialization() {
    let body = br#"{"RayID": "7d1c9f8e", "EdgeResponseStatus": 200, "detail": {"nested": true}}"#;
    let batch = run_pipeline(body, None);

    assert_eq!(batch.accepted, 1);
    let reparsed: Value = serde_json::from_str(&batch.entries[0].line).expect("valid JSON line");
    assert_eq!(
        reparsed,
        serde_json::json!({"RayID": "7d1c9f8e", "EdgeResponseStatus": 200, "detail": {"nested": true}})
    );
    // Key order survives the round trip.
    assert!(batch.entries[0].line.starts_with(r#"{"RayID":"#));
}

#[test]
fn empty_body_is_an_empty_success() {
    let batch = run_pipeline(b"", None);
    assert_eq!(batch.accepted, 0);
    assert_eq!(batch.rejected, 0);
    assert!(batch.entries.is_empty());
}

#[test]
fn all_rejected_batch_is_a_zero_entry_success() {
    let batch = run_pipeline(br#"[{}, {"a": null}, {"b": ""}]"#, None);
    assert_eq!(batch.accepted, 0);
    assert_eq!(batch.rejected, 3);
    assert!(batch.entries.is_empty());
}

#[test]
fn scalar_body_fails_before_normalization() {
    let err = decode(br#""hello""#, None).expect_err("scalar body must fail");
    assert_eq!(err, DecodeError::UnsupportedShape("string"));
}

#[test]
fn corrupt_gzip_fails_with_no_partial_output() {
    let mut body = gzip(b"{\"a\": 1}\n{\"b\": 2}\n");
    let len = body.len();
    body.truncate(len / 2);

    let err = decode(&body, Some("gzip")).expect_err("truncated gzip must fail");
    assert!(matches!(err, DecodeError::CompressionFailure(_)));
}

#[test]
fn large_ndjson_batch_preserves_counts_and_order() {
    let mut ndjson = Vec::new();
    for i in 0..500 {
        writeln!(ndjson, "{{\"seq\": {i}}}").expect("write fixture line");
    }
    let batch = run_pipeline(&gzip(&ndjson), Some("gzip"));

    assert_eq!(batch.accepted, 500);
    assert_eq!(batch.rejected, 0);
    assert_eq!(batch.entries[0].line, r#"{"seq":0}"#);
    assert_eq!(batch.entries[499].line, r#"{"seq":499}"#);
}

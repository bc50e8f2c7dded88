//! Loki push client.
//!
//! Wraps a normalized batch into the push envelope — one stream carrying the
//! configured label set — and performs a single POST per inbound request.
//! Envelope construction is a pure function so tests can assert on the wire
//! shape without a network.

use crate::config::BridgeConfig;
use crate::normalize::NormalizedEntry;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Errors from the outbound push. These map to server-side HTTP statuses,
/// unlike decode errors which are the client's fault.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PushError {
    /// The request never completed (connect failure, timeout, bad URL).
    #[error("loki push request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Loki answered with a non-success status.
    #[error("loki rejected push with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// HTTP client for the Loki push API, built once at startup and shared
/// across requests.
#[derive(Debug, Clone)]
pub struct LokiClient {
    http: reqwest::Client,
    push_url: String,
    labels: BTreeMap<String, String>,
}

impl LokiClient {
    pub fn new(config: &BridgeConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http,
            push_url: config.loki_url.clone(),
            labels: config.stream_labels.clone(),
        })
    }

    /// Push a batch of entries as one labeled stream.
    pub async fn push(&self, entries: &[NormalizedEntry]) -> Result<(), PushError> {
        let payload = build_push_payload(&self.labels, entries);
        let response = self.http.post(&self.push_url).json(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PushError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(entries = entries.len(), url = %self.push_url, "loki push succeeded");
        Ok(())
    }
}

/// Build the push envelope: a single stream with the static label set and
/// `[nanos-as-string, line]` value pairs in entry order.
pub fn build_push_payload(
    labels: &BTreeMap<String, String>,
    entries: &[NormalizedEntry],
) -> Value {
    let values: Vec<Value> = entries
        .iter()
        .map(|entry| json!([entry.timestamp_nanos.to_string(), entry.line]))
        .collect();

    json!({
        "streams": [
            {
                "stream": labels,
                "values": values,
            }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> BTreeMap<String, String> {
        BTreeMap::from([("job".to_string(), "cloudflare-logpush".to_string())])
    }

    fn entry(timestamp_nanos: i64, line: &str) -> NormalizedEntry {
        NormalizedEntry {
            timestamp_nanos,
            line: line.to_string(),
        }
    }

    #[test]
    fn payload_carries_a_single_labeled_stream() {
        let payload = build_push_payload(&labels(), &[entry(1, "{\"a\":1}")]);
        let streams = payload["streams"].as_array().expect("streams array");
        assert_eq!(streams.len(), 1);
        assert_eq!(streams[0]["stream"]["job"], "cloudflare-logpush");
    }

    #[test]
    fn values_are_nanosecond_strings_with_lines_in_order() {
        let entries = [
            entry(1_700_000_000_000_000_000, "first"),
            entry(42, "second"),
        ];
        let payload = build_push_payload(&labels(), &entries);
        let values = payload["streams"][0]["values"]
            .as_array()
            .expect("values array");
        assert_eq!(
            values[0],
            serde_json::json!(["1700000000000000000", "first"])
        );
        assert_eq!(values[1], serde_json::json!(["42", "second"]));
    }

    #[test]
    fn empty_batch_builds_an_empty_stream() {
        let payload = build_push_payload(&labels(), &[]);
        assert_eq!(payload["streams"][0]["values"], serde_json::json!([]));
    }

    #[test]
    fn client_builds_from_default_config() {
        let client = LokiClient::new(&BridgeConfig::default()).expect("client builds");
        assert_eq!(client.push_url, BridgeConfig::default().loki_url);
    }
}

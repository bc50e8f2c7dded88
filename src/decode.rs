//! Decoder — turns a raw Logpush request body into candidate records.
//!
//! Logpush delivery is loosely shaped: a plain JSON array, a single JSON
//! object, or a gzip stream of newline-delimited JSON (with the occasional
//! non-JSON line mixed in). This module flattens all of those into one
//! ordered sequence of [`CandidateRecord`] values so the normalizer never
//! has to care where a record came from.

use flate2::read::MultiGzDecoder;
use serde_json::{Map, Value};
use std::io::Read;
use thiserror::Error;

/// One decoded input unit, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateRecord {
    /// The input unit was a JSON object. Keys and values are carried
    /// unmodified, in their original order.
    Structured(Map<String, Value>),
    /// The input unit was a newline-delimited line that is not valid JSON.
    RawText(String),
}

/// Errors that abort decoding of a request body.
///
/// Everything else (non-object array elements, unparseable lines, blank
/// lines) degrades to "no record from this unit" and is never an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// The body declared gzip encoding but the stream would not decompress.
    #[error("failed to decompress gzip body: {0}")]
    CompressionFailure(String),

    /// The body is a single JSON scalar, neither array nor object.
    #[error("unsupported top-level JSON value: expected array or object, got {0}")]
    UnsupportedShape(&'static str),
}

/// Decode a request body into candidate records.
///
/// `content_encoding` is the raw `Content-Encoding` header value, if any.
/// An empty or absent body decodes to an empty sequence; that is a success,
/// not an error, regardless of the declared encoding.
pub fn decode(
    raw_body: &[u8],
    content_encoding: Option<&str>,
) -> Result<Vec<CandidateRecord>, DecodeError> {
    if raw_body.is_empty() {
        return Ok(Vec::new());
    }

    let payload = if is_gzip(content_encoding) {
        let mut decompressed = Vec::new();
        MultiGzDecoder::new(raw_body)
            .read_to_end(&mut decompressed)
            .map_err(|err| DecodeError::CompressionFailure(err.to_string()))?;
        decompressed
    } else {
        raw_body.to_vec()
    };

    if payload.is_empty() {
        return Ok(Vec::new());
    }

    let text = String::from_utf8_lossy(&payload);
    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Array(elements)) => Ok(elements
            .into_iter()
            .filter_map(|element| match element {
                Value::Object(fields) => Some(CandidateRecord::Structured(fields)),
                _ => None,
            })
            .collect()),
        Ok(Value::Object(fields)) => Ok(vec![CandidateRecord::Structured(fields)]),
        Ok(other) => Err(DecodeError::UnsupportedShape(json_type_name(&other))),
        // Not a single JSON document: the newline-delimited path.
        Err(_) => Ok(decode_lines(&text)),
    }
}

/// Split newline-delimited text into candidates.
///
/// Lines that are blank after trimming contribute nothing. Lines that parse
/// as JSON objects become [`CandidateRecord::Structured`]; JSON scalars and
/// arrays on a line are dropped; everything else is carried as raw text.
fn decode_lines(text: &str) -> Vec<CandidateRecord> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match serde_json::from_str::<Value>(line) {
            Ok(Value::Object(fields)) => Some(CandidateRecord::Structured(fields)),
            Ok(_) => None,
            Err(_) => Some(CandidateRecord::RawText(line.to_string())),
        })
        .collect()
}

fn is_gzip(content_encoding: Option<&str>) -> bool {
    content_encoding
        .map(str::trim)
        .is_some_and(|value| value.eq_ignore_ascii_case("gzip"))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

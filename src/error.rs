use crate::decode::DecodeError;
use crate::loki::PushError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub type BridgeResult<T> = Result<T, BridgeError>;

/// Bridge error types
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The request body could not be decoded: corrupt gzip or an
    /// unsupported top-level JSON shape. Always the client's fault.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The forward to Loki failed. Server-side, distinct from decode errors
    /// so callers can tell a bad batch from a bad backend.
    #[error("push error: {0}")]
    Push(#[from] PushError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("not found")]
    NotFound,
}

impl BridgeError {
    /// Get HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            BridgeError::Decode(_) => StatusCode::BAD_REQUEST,
            BridgeError::Push(_) => StatusCode::BAD_GATEWAY,
            BridgeError::Config(_) | BridgeError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            BridgeError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    /// Get error code string
    fn error_code(&self) -> &'static str {
        match self {
            BridgeError::Decode(DecodeError::CompressionFailure(_)) => "COMPRESSION_FAILURE",
            BridgeError::Decode(_) => "UNSUPPORTED_SHAPE",
            BridgeError::Push(_) => "LOKI_PUSH_FAILED",
            BridgeError::Config(_) => "CONFIG_ERROR",
            BridgeError::Internal(_) => "INTERNAL_ERROR",
            BridgeError::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<std::net::AddrParseError> for BridgeError {
    fn from(err: std::net::AddrParseError) -> Self {
        BridgeError::Config(format!("Invalid address: {err}"))
    }
}

impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        BridgeError::Internal(format!("IO error: {err}"))
    }
}

impl From<reqwest::Error> for BridgeError {
    fn from(err: reqwest::Error) -> Self {
        BridgeError::Config(format!("HTTP client setup failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_errors_are_client_errors() {
        let err = BridgeError::from(DecodeError::UnsupportedShape("string"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "UNSUPPORTED_SHAPE");

        let err = BridgeError::from(DecodeError::CompressionFailure("truncated".into()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "COMPRESSION_FAILURE");
    }

    #[test]
    fn push_errors_are_upstream_errors() {
        let err = BridgeError::from(PushError::Rejected {
            status: 500,
            body: "ingester unavailable".into(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.error_code(), "LOKI_PUSH_FAILED");
    }
}

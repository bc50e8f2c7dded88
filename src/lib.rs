//! logpush-bridge - HTTP bridge from Cloudflare Logpush to Loki
//!
//! This crate accepts Logpush batch deliveries over HTTP, normalizes every
//! record into a single timestamped log line, and forwards the batch to a
//! Loki-compatible push API as one labeled stream. It supports:
//!
//! - **Batch shapes**: JSON array, single JSON object, gzip-compressed
//!   newline-delimited JSON (raw text lines included)
//! - **Timestamps**: per-record `EdgeStartTimestamp` extraction (epoch ms,
//!   converted to nanoseconds) with a deterministic per-batch fallback
//! - **Configuration**: file and environment based configuration
//! - **Error handling**: typed errors with client/upstream status mapping
//! - **Graceful shutdown**: proper signal handling for production deployments
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use logpush_bridge::BridgeConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = BridgeConfig::load()?;
//!     logpush_bridge::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - Service information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `POST /logpush` - Batch ingestion

pub mod config;
pub mod decode;
pub mod error;
pub mod loki;
pub mod middleware;
pub mod normalize;
pub mod routes;
pub mod server;
pub mod state;

pub use config::BridgeConfig;
pub use decode::{decode, CandidateRecord, DecodeError};
pub use error::{BridgeError, BridgeResult};
pub use loki::{build_push_payload, LokiClient, PushError};
pub use normalize::{normalize, NormalizedBatch, NormalizedEntry, EVENT_TIMESTAMP_FIELD};
pub use server::{build_router, start_server};
pub use state::AppState;

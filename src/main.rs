//! logpush-bridge - HTTP bridge from Cloudflare Logpush to Loki
//!
//! This binary receives Logpush batch deliveries, normalizes them into
//! timestamped log lines, and forwards them to a Loki push endpoint.

use logpush_bridge::BridgeConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = BridgeConfig::load()?;

    // Start server
    logpush_bridge::start_server(config).await?;

    Ok(())
}

use crate::config::BridgeConfig;
use crate::error::BridgeResult;
use crate::loki::LokiClient;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Bridge configuration
    pub config: Arc<BridgeConfig>,

    /// Loki push client (shared across requests)
    pub loki: LokiClient,
}

impl AppState {
    /// Create new application state
    pub fn new(config: BridgeConfig) -> BridgeResult<Self> {
        let loki = LokiClient::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            loki,
        })
    }
}

use std::sync::Arc;

use crate::{config::RelayConfig, gemini::GeminiClient};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub gemini: GeminiClient,
}

impl AppState {
    pub fn new(config: RelayConfig) -> Self {
        let gemini = GeminiClient::new(&config);
        Self {
            config: Arc::new(config),
            gemini,
        }
    }
}

use serde::{Deserialize, Serialize};

/// Configuration for the JS API bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// How long a UI-mediated endpoint waits for the host to handle it
    /// (valid range: 100-60000).
    pub ui_timeout_ms: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            ui_timeout_ms: 2000,
        }
    }
}

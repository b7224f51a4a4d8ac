//! Configuration schema types for cardbridge.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod api;
mod gestures;
mod system;

pub use api::*;
pub use gestures::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Root configuration for cardbridge.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BridgeConfig {
    pub api: ApiConfig,
    pub gestures: GestureConfig,
    pub logging: LoggingConfig,
}

//! Full configuration validation.
//!
//! Validates numeric ranges and gesture binding uniqueness, collecting
//! every problem into a single `ConfigError`.

mod helpers;


use crate::bindings;
use crate::schema::BridgeConfig;
use cardbridge_common::ConfigError;
use helpers::check_range;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &BridgeConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    if let Err(e) = bindings::validate_no_duplicates(&config.gestures.bindings) {
        errors.push(e.to_string());
    }

    check_range(
        &mut errors,
        "api.ui_timeout_ms",
        config.api.ui_timeout_ms,
        100..=60_000,
    );
    check_range(
        &mut errors,
        "gestures.swipe_threshold",
        config.gestures.swipe_threshold,
        1.0..=200.0,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

//! TOML config file loading and creation.

use crate::schema::BridgeConfig;
use crate::validation;
use cardbridge_common::ConfigError;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Load config from a specific TOML file path.
///
/// Missing fields fall back to serde defaults. If the parsed config fails
/// validation, a warning is logged and the default config is returned.
pub fn load_from_path(path: &Path) -> Result<BridgeConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::ParseError(format!("failed to read {}: {e}", path.display()))
    })?;

    let config: BridgeConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
        warn!("falling back to default config");
        return Ok(BridgeConfig::default());
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// If the file does not exist, writes a commented default file and
/// returns defaults.
pub fn load_default() -> Result<BridgeConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        info!("no config found at {}, creating default", path.display());
        create_default_config(&path)?;
        return Ok(BridgeConfig::default());
    }

    load_from_path(&path)
}

/// Get the platform-specific default config file path.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("cardbridge").join("config.toml"))
}

/// Create a default TOML config file with documentation comments.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    std::fs::write(path, DEFAULT_CONFIG_TOML).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!("created default config at {}", path.display());
    Ok(())
}

const DEFAULT_CONFIG_TOML: &str = r##"# cardbridge configuration
# Only override what you want to change -- missing fields use defaults.

[api]
# ui_timeout_ms = 2000     # 100-60000

[gestures]
# tap_mode = "nine"        # nine, four
# swipe_threshold = 18.0   # 1.0-200.0

[gestures.bindings]
# Gesture names: tap_top_left, tap_top, tap_top_right, tap_left, tap_center,
# tap_right, tap_bottom_left, tap_bottom, tap_bottom_right, swipe_up,
# swipe_down, swipe_left, swipe_right, double_tap. Empty = unbound.
# show_answer = "tap_center"
# answer_again = "tap_left"
# answer_hard = "tap_bottom"
# answer_good = "tap_right"
# answer_easy = "tap_top_right"
# undo = "swipe_left"
# bury_card = ""
# suspend_card = ""
# mark_note = "swipe_up"
# toggle_flag_red = ""
# edit_note = "double_tap"
# card_info = ""

[logging]
# level = "INFO"           # DEBUG, INFO, WARNING, ERROR
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TapModeSetting;

    #[test]
    fn load_from_nonexistent_returns_file_not_found() {
        let result = load_from_path(Path::new("/tmp/nonexistent_cardbridge_config.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn load_valid_partial_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[gestures]
tap_mode = "four"
swipe_threshold = 24.0
"#,
        )
        .unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.gestures.tap_mode, TapModeSetting::Four);
        assert_eq!(config.gestures.swipe_threshold, 24.0);
        assert_eq!(config.api.ui_timeout_ms, 2000);
    }

    #[test]
    fn load_invalid_toml_returns_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is [not valid toml").unwrap();

        let result = load_from_path(&path);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn out_of_range_values_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nui_timeout_ms = 1\n").unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.api.ui_timeout_ms, 2000);
    }

    #[test]
    fn default_file_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        create_default_config(&path).unwrap();
        assert!(path.exists());

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.api.ui_timeout_ms, 2000);
        assert_eq!(config.gestures.bindings.edit_note, "double_tap");
    }

    #[test]
    fn default_config_path_ends_with_cardbridge() {
        if let Ok(path) = default_config_path() {
            assert!(path.ends_with("cardbridge/config.toml"));
        }
    }
}

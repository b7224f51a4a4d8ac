//! Gesture classifier and gesture binding configuration types.

use serde::{Deserialize, Serialize};

/// How taps are divided into zones.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TapModeSetting {
    /// 3x3 grid.
    #[default]
    Nine,
    /// Four triangles cut by the viewport diagonals.
    Four,
}

/// Gesture classifier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub tap_mode: TapModeSetting,
    /// Swipe threshold in unscaled pixels (valid range: 1.0-200.0).
    pub swipe_threshold: f64,
    pub bindings: GestureBindingConfig,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_mode: TapModeSetting::Nine,
            swipe_threshold: 18.0,
            bindings: GestureBindingConfig::default(),
        }
    }
}

/// Reviewer commands bound to gestures.
///
/// Values are gesture names such as `tap_top_left`, `swipe_up` or
/// `double_tap`. An empty string leaves the command unbound.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureBindingConfig {
    pub show_answer: String,
    pub answer_again: String,
    pub answer_hard: String,
    pub answer_good: String,
    pub answer_easy: String,
    pub undo: String,
    pub bury_card: String,
    pub suspend_card: String,
    pub mark_note: String,
    pub toggle_flag_red: String,
    pub edit_note: String,
    pub card_info: String,
}

impl Default for GestureBindingConfig {
    fn default() -> Self {
        Self {
            show_answer: "tap_center".into(),
            answer_again: "tap_left".into(),
            answer_hard: "tap_bottom".into(),
            answer_good: "tap_right".into(),
            answer_easy: "tap_top_right".into(),
            undo: "swipe_left".into(),
            bury_card: String::new(),
            suspend_card: String::new(),
            mark_note: "swipe_up".into(),
            toggle_flag_red: String::new(),
            edit_note: "double_tap".into(),
            card_info: String::new(),
        }
    }
}

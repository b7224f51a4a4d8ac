//! Gesture binding validation utilities.

use crate::schema::GestureBindingConfig;
use cardbridge_common::ConfigError;
use std::collections::HashMap;

/// Returns all gesture bindings as `(command, gesture)` pairs, including
/// unbound (empty) ones.
pub fn all_bindings(config: &GestureBindingConfig) -> Vec<(&str, &str)> {
    vec![
        ("show_answer", config.show_answer.as_str()),
        ("answer_again", config.answer_again.as_str()),
        ("answer_hard", config.answer_hard.as_str()),
        ("answer_good", config.answer_good.as_str()),
        ("answer_easy", config.answer_easy.as_str()),
        ("undo", config.undo.as_str()),
        ("bury_card", config.bury_card.as_str()),
        ("suspend_card", config.suspend_card.as_str()),
        ("mark_note", config.mark_note.as_str()),
        ("toggle_flag_red", config.toggle_flag_red.as_str()),
        ("edit_note", config.edit_note.as_str()),
        ("card_info", config.card_info.as_str()),
    ]
}

/// Canonical spelling of a gesture name: trimmed, lowercase, `-` read as `_`.
///
/// `"TAP-Center "` and `"tap_center"` name the same gesture.
pub fn normalize_gesture_name(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace('-', "_")
}

/// Validate that no two commands are bound to the same gesture.
///
/// Gesture names are compared in their canonical spelling.
pub fn validate_no_duplicates(config: &GestureBindingConfig) -> Result<(), ConfigError> {
    let mut seen: HashMap<String, &str> = HashMap::new();

    for (name, gesture) in all_bindings(config) {
        let gesture = normalize_gesture_name(gesture);
        if gesture.is_empty() {
            continue;
        }
        if let Some(existing_name) = seen.get(&gesture) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate gesture binding '{gesture}': assigned to both '{existing_name}' and '{name}'"
            )));
        }
        seen.insert(gesture, name);
    }

    Ok(())
}

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use cardbridge_config::schema::GestureBindingConfig;

use crate::gesture::{Gesture, ViewerCommand};

/// Maps gestures to [`ViewerCommand`]s.
///
/// Built from [`GestureBindingConfig`] at startup.
pub struct GestureBindings {
    bindings: HashMap<Gesture, ViewerCommand>,
}

impl GestureBindings {
    /// Build the bindings from the config section.
    ///
    /// Empty entries leave a command unbound. Unknown gesture names, and
    /// gestures already claimed by an earlier command, are logged as
    /// warnings and skipped.
    pub fn from_config(config: &GestureBindingConfig) -> Self {
        let mut bindings = HashMap::new();

        let mappings: [(&str, ViewerCommand); 12] = [
            (config.show_answer.as_str(), ViewerCommand::ShowAnswer),
            (config.answer_again.as_str(), ViewerCommand::AnswerAgain),
            (config.answer_hard.as_str(), ViewerCommand::AnswerHard),
            (config.answer_good.as_str(), ViewerCommand::AnswerGood),
            (config.answer_easy.as_str(), ViewerCommand::AnswerEasy),
            (config.undo.as_str(), ViewerCommand::Undo),
            (config.bury_card.as_str(), ViewerCommand::BuryCard),
            (config.suspend_card.as_str(), ViewerCommand::SuspendCard),
            (config.mark_note.as_str(), ViewerCommand::MarkNote),
            (config.toggle_flag_red.as_str(), ViewerCommand::ToggleFlagRed),
            (config.edit_note.as_str(), ViewerCommand::EditNote),
            (config.card_info.as_str(), ViewerCommand::CardInfo),
        ];

        for (binding_str, command) in mappings {
            if binding_str.trim().is_empty() {
                continue;
            }
            match binding_str.parse::<Gesture>() {
                Ok(gesture) => match bindings.entry(gesture) {
                    Entry::Vacant(slot) => {
                        slot.insert(command);
                    }
                    Entry::Occupied(existing) => {
                        tracing::warn!(
                            "gesture {gesture} already bound to {}, ignoring binding for {}",
                            existing.get().label(),
                            command.label()
                        );
                    }
                },
                Err(e) => {
                    tracing::warn!("invalid gesture binding for {}: {e}", command.label());
                }
            }
        }

        Self { bindings }
    }

    /// Look up the command bound to a gesture.
    pub fn lookup(&self, gesture: Gesture) -> Option<ViewerCommand> {
        self.bindings.get(&gesture).copied()
    }

    /// Reverse lookup: the gesture bound to a command, if any.
    pub fn gesture_for_command(&self, command: ViewerCommand) -> Option<Gesture> {
        self.bindings
            .iter()
            .find(|(_, c)| **c == command)
            .map(|(g, _)| *g)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_binds_eight_gestures() {
        let bindings = GestureBindings::from_config(&GestureBindingConfig::default());
        assert_eq!(bindings.len(), 8);
        assert_eq!(
            bindings.lookup(Gesture::TapCenter),
            Some(ViewerCommand::ShowAnswer)
        );
        assert_eq!(
            bindings.lookup(Gesture::DoubleTap),
            Some(ViewerCommand::EditNote)
        );
        assert_eq!(bindings.lookup(Gesture::SwipeDown), None);
    }

    #[test]
    fn invalid_names_are_skipped() {
        let config = GestureBindingConfig {
            bury_card: "wiggle".into(),
            ..Default::default()
        };
        let bindings = GestureBindings::from_config(&config);
        assert_eq!(bindings.len(), 8);
        assert_eq!(bindings.gesture_for_command(ViewerCommand::BuryCard), None);
    }

    #[test]
    fn first_command_keeps_a_gesture_bound_twice() {
        let config = GestureBindingConfig {
            answer_good: "TAP-CENTER".into(),
            ..Default::default()
        };
        let bindings = GestureBindings::from_config(&config);
        assert_eq!(
            bindings.lookup(Gesture::TapCenter),
            Some(ViewerCommand::ShowAnswer)
        );
        assert_eq!(
            bindings.gesture_for_command(ViewerCommand::ShowAnswer),
            Some(Gesture::TapCenter)
        );
        assert_eq!(bindings.gesture_for_command(ViewerCommand::AnswerGood), None);
    }

    #[test]
    fn reverse_lookup() {
        let config = GestureBindingConfig {
            suspend_card: "swipe_down".into(),
            ..Default::default()
        };
        let bindings = GestureBindings::from_config(&config);
        assert_eq!(
            bindings.gesture_for_command(ViewerCommand::SuspendCard),
            Some(Gesture::SwipeDown)
        );
    }

    #[test]
    fn empty_config_is_empty() {
        let config = GestureBindingConfig {
            show_answer: String::new(),
            answer_again: String::new(),
            answer_hard: String::new(),
            answer_good: String::new(),
            answer_easy: String::new(),
            undo: String::new(),
            bury_card: String::new(),
            suspend_card: String::new(),
            mark_note: String::new(),
            toggle_flag_red: String::new(),
            edit_note: String::new(),
            card_info: String::new(),
        };
        let bindings = GestureBindings::from_config(&config);
        assert!(bindings.is_empty());
    }
}

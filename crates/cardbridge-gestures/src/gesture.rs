use cardbridge_config::bindings::normalize_gesture_name;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every gesture the classifier can produce.
///
/// The nine `Tap*` values form a 3x3 grid. The four-zone mode only ever
/// produces `TapTop`, `TapLeft`, `TapRight` and `TapBottom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    TapTopLeft,
    TapTop,
    TapTopRight,
    TapLeft,
    TapCenter,
    TapRight,
    TapBottomLeft,
    TapBottom,
    TapBottomRight,
    SwipeUp,
    SwipeDown,
    SwipeLeft,
    SwipeRight,
    DoubleTap,
}

impl Gesture {
    pub const ALL: [Gesture; 14] = [
        Gesture::TapTopLeft,
        Gesture::TapTop,
        Gesture::TapTopRight,
        Gesture::TapLeft,
        Gesture::TapCenter,
        Gesture::TapRight,
        Gesture::TapBottomLeft,
        Gesture::TapBottom,
        Gesture::TapBottomRight,
        Gesture::SwipeUp,
        Gesture::SwipeDown,
        Gesture::SwipeLeft,
        Gesture::SwipeRight,
        Gesture::DoubleTap,
    ];

    /// Config/CLI name, e.g. `tap_top_left`.
    pub fn name(self) -> &'static str {
        match self {
            Gesture::TapTopLeft => "tap_top_left",
            Gesture::TapTop => "tap_top",
            Gesture::TapTopRight => "tap_top_right",
            Gesture::TapLeft => "tap_left",
            Gesture::TapCenter => "tap_center",
            Gesture::TapRight => "tap_right",
            Gesture::TapBottomLeft => "tap_bottom_left",
            Gesture::TapBottom => "tap_bottom",
            Gesture::TapBottomRight => "tap_bottom_right",
            Gesture::SwipeUp => "swipe_up",
            Gesture::SwipeDown => "swipe_down",
            Gesture::SwipeLeft => "swipe_left",
            Gesture::SwipeRight => "swipe_right",
            Gesture::DoubleTap => "double_tap",
        }
    }

    pub fn is_tap(self) -> bool {
        !matches!(
            self,
            Gesture::SwipeUp
                | Gesture::SwipeDown
                | Gesture::SwipeLeft
                | Gesture::SwipeRight
                | Gesture::DoubleTap
        )
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gesture: '{0}'")]
pub struct ParseGestureError(pub String);

impl FromStr for Gesture {
    type Err = ParseGestureError;

    /// Case-insensitive; accepts `-` in place of `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_gesture_name(s);
        Gesture::ALL
            .into_iter()
            .find(|g| g.name() == normalized)
            .ok_or_else(|| ParseGestureError(s.to_string()))
    }
}

/// Reviewer commands a gesture can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewerCommand {
    ShowAnswer,
    AnswerAgain,
    AnswerHard,
    AnswerGood,
    AnswerEasy,
    Undo,
    BuryCard,
    SuspendCard,
    MarkNote,
    ToggleFlagRed,
    EditNote,
    CardInfo,
}

impl ViewerCommand {
    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            ViewerCommand::ShowAnswer => "Show Answer",
            ViewerCommand::AnswerAgain => "Answer Again",
            ViewerCommand::AnswerHard => "Answer Hard",
            ViewerCommand::AnswerGood => "Answer Good",
            ViewerCommand::AnswerEasy => "Answer Easy",
            ViewerCommand::Undo => "Undo",
            ViewerCommand::BuryCard => "Bury Card",
            ViewerCommand::SuspendCard => "Suspend Card",
            ViewerCommand::MarkNote => "Mark Note",
            ViewerCommand::ToggleFlagRed => "Toggle Red Flag",
            ViewerCommand::EditNote => "Edit Note",
            ViewerCommand::CardInfo => "Card Info",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for gesture in Gesture::ALL {
            assert_eq!(gesture.name().parse::<Gesture>(), Ok(gesture));
        }
    }

    #[test]
    fn from_str_is_lenient_about_case_and_dashes() {
        assert_eq!("TAP_CENTER".parse::<Gesture>(), Ok(Gesture::TapCenter));
        assert_eq!("swipe-left".parse::<Gesture>(), Ok(Gesture::SwipeLeft));
        assert_eq!(" double_tap ".parse::<Gesture>(), Ok(Gesture::DoubleTap));
    }

    #[test]
    fn from_str_rejects_unknown() {
        let err = "triple_tap".parse::<Gesture>().unwrap_err();
        assert_eq!(err.to_string(), "unknown gesture: 'triple_tap'");
    }

    #[test]
    fn serde_name_matches_config_name() {
        let json = serde_json::to_string(&Gesture::TapBottomRight).unwrap();
        assert_eq!(json, "\"tap_bottom_right\"");
    }

    #[test]
    fn taps_and_swipes_are_distinguished() {
        assert!(Gesture::TapCenter.is_tap());
        assert!(Gesture::TapBottomLeft.is_tap());
        assert!(!Gesture::SwipeUp.is_tap());
        assert!(!Gesture::DoubleTap.is_tap());
    }

    #[test]
    fn command_labels() {
        assert_eq!(ViewerCommand::ShowAnswer.label(), "Show Answer");
        assert_eq!(ViewerCommand::ToggleFlagRed.label(), "Toggle Red Flag");
    }
}

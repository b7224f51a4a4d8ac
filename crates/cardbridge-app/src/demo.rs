//! Stand-in collaborators for running the API outside a real viewer.

use cardbridge_common::CardId;
use cardbridge_jsapi::{
    BackendError, PendingUiRequest, QueueMode, ReviewerHost, Speech, UiRequests,
};
use tokio::task::JoinHandle;

/// Languages the logging speech engine claims to support.
const SPEECH_LANGUAGES: &[&str] = &["en", "es", "de", "fr", "ja"];

/// Reviewer state fixed at start-up.
pub struct DemoHost {
    pub top: Option<CardId>,
    pub showing_answer: bool,
}

impl ReviewerHost for DemoHost {
    fn top_card(&self) -> Option<CardId> {
        self.top
    }

    fn is_showing_answer(&self) -> bool {
        self.showing_answer
    }

    fn is_system_in_dark_mode(&self) -> bool {
        false
    }

    fn is_network_metered(&self) -> bool {
        false
    }
}

/// Speech engine that only logs what it would say.
pub struct LoggingSpeech;

impl Speech for LoggingSpeech {
    fn speak(&self, text: &str, mode: QueueMode) -> Result<(), BackendError> {
        tracing::info!(?mode, "tts: {text}");
        Ok(())
    }

    fn set_language(&self, language: &str) -> bool {
        let primary = language.split(['-', '_']).next().unwrap_or_default();
        let supported = SPEECH_LANGUAGES
            .iter()
            .any(|l| l.eq_ignore_ascii_case(primary));
        tracing::info!(language, supported, "tts language");
        supported
    }

    fn set_pitch(&self, pitch: f32) -> Result<(), BackendError> {
        tracing::info!(pitch, "tts pitch");
        Ok(())
    }

    fn set_speech_rate(&self, rate: f32) -> Result<(), BackendError> {
        tracing::info!(rate, "tts speech rate");
        Ok(())
    }

    fn is_speaking(&self) -> bool {
        false
    }

    fn stop(&self) -> Result<(), BackendError> {
        Ok(())
    }
}

/// Acknowledge every UI request until the dispatcher side goes away.
pub fn spawn_ui(mut requests: UiRequests) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(pending) = requests.recv().await {
            acknowledge(pending);
        }
    })
}

/// Act on `pending` unless the dispatcher already timed out on it.
/// Returns whether the request was handled.
fn acknowledge(pending: PendingUiRequest) -> bool {
    if pending.is_abandoned() {
        tracing::warn!(request = ?pending.request, "UI request skipped: dispatcher gave up");
        return false;
    }
    tracing::info!(request = ?pending.request, "UI request handled");
    if !pending.complete() {
        tracing::warn!("UI request completed after the dispatcher gave up");
        return false;
    }
    true
}

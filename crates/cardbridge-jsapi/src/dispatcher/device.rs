//! Text-to-speech and device endpoints.

use crate::backend::QueueMode;
use crate::endpoint::{AndroidEndpoint, TtsEndpoint};
use crate::error::ApiError;
use crate::request::RequestData;
use crate::response::ApiResponse;
use crate::ui::UiRequest;

use super::{HandlerResult, JsApi};

/// A strictly positive, finite multiplier (pitch, speech rate).
fn positive_factor(data: &RequestData, key: &'static str) -> Result<f32, ApiError> {
    // Narrowed first: finite doubles past f32::MAX become infinite.
    let factor = data.require_f64(key)? as f32;
    if !factor.is_finite() || factor <= 0.0 {
        return Err(ApiError::invalid(key, "must be a positive number"));
    }
    Ok(factor)
}

impl JsApi {
    pub(super) fn tts_endpoint(&self, endpoint: TtsEndpoint, data: &RequestData) -> HandlerResult {
        match endpoint {
            TtsEndpoint::Speak => {
                let text = data.require_str("text")?;
                let mode = match data.optional_i64("queueMode")? {
                    None => QueueMode::default(),
                    Some(code) => QueueMode::from_code(code)
                        .ok_or_else(|| ApiError::invalid("queueMode", "must be 0 or 1"))?,
                };
                self.speech.speak(text, mode)?;
                Ok(ApiResponse::empty())
            }
            TtsEndpoint::SetLanguage => {
                let language = data.require_str("language")?;
                Ok(ApiResponse::ok(self.speech.set_language(language)))
            }
            TtsEndpoint::SetPitch => {
                self.speech.set_pitch(positive_factor(data, "pitch")?)?;
                Ok(ApiResponse::empty())
            }
            TtsEndpoint::SetSpeechRate => {
                self.speech.set_speech_rate(positive_factor(data, "rate")?)?;
                Ok(ApiResponse::empty())
            }
            TtsEndpoint::IsSpeaking => Ok(ApiResponse::ok(self.speech.is_speaking())),
            TtsEndpoint::Stop => {
                self.speech.stop()?;
                Ok(ApiResponse::empty())
            }
        }
    }

    pub(super) async fn android_endpoint(
        &self,
        endpoint: AndroidEndpoint,
        data: &RequestData,
    ) -> HandlerResult {
        match endpoint {
            AndroidEndpoint::ShowSnackbar => {
                let text = data.require_str("text")?.to_string();
                let duration_ms = data
                    .optional_i64("duration")?
                    .map(|d| {
                        u32::try_from(d).map_err(|_| {
                            ApiError::invalid("duration", "must be a non-negative number of milliseconds")
                        })
                    })
                    .transpose()?;
                self.ui_round_trip(UiRequest::ShowSnackbar { text, duration_ms })
                    .await
            }
            AndroidEndpoint::IsSystemInDarkMode => {
                Ok(ApiResponse::ok(self.host.is_system_in_dark_mode()))
            }
            AndroidEndpoint::IsNetworkMetered => {
                Ok(ApiResponse::ok(self.host.is_network_metered()))
            }
        }
    }
}

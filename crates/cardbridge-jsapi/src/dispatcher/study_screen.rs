use crate::color::is_valid_color;
use crate::endpoint::StudyScreenEndpoint;
use crate::error::ApiError;
use crate::model::{CollectionOp, Rating};
use crate::request::RequestData;
use crate::response::ApiResponse;
use crate::ui::UiRequest;

use super::{HandlerResult, JsApi};

fn rating(data: &RequestData) -> Result<Rating, ApiError> {
    let code = data.require_i64("rating")?;
    Rating::from_code(code).ok_or_else(|| ApiError::invalid("rating", "must be between 1 and 4"))
}

impl JsApi {
    pub(super) async fn study_screen_endpoint(
        &self,
        endpoint: StudyScreenEndpoint,
        data: &RequestData,
    ) -> HandlerResult {
        match endpoint {
            StudyScreenEndpoint::GetNewCount => {
                Ok(ApiResponse::ok(self.collection.queue_counts().await?.new))
            }
            StudyScreenEndpoint::GetLearnCount => {
                Ok(ApiResponse::ok(self.collection.queue_counts().await?.learning))
            }
            StudyScreenEndpoint::GetReviewCount => {
                Ok(ApiResponse::ok(self.collection.queue_counts().await?.review))
            }
            StudyScreenEndpoint::IsShowingAnswer => {
                Ok(ApiResponse::ok(self.host.is_showing_answer()))
            }
            StudyScreenEndpoint::GetNextTime => {
                let rating = rating(data)?;
                let card = self.target_card_id(data)?;
                let label = self.collection.next_interval_label(card, rating).await?;
                Ok(ApiResponse::ok(label))
            }
            StudyScreenEndpoint::Answer => {
                let rating = rating(data)?;
                let card = self.target_card_id(data)?;
                self.run(CollectionOp::AnswerCard { card, rating }).await
            }
            StudyScreenEndpoint::ShowAnswer => self.ui_round_trip(UiRequest::ShowAnswer).await,
            StudyScreenEndpoint::OpenCardInfo => {
                let card = self.target_card_id(data)?;
                self.ui_round_trip(UiRequest::OpenCardInfo(card)).await
            }
            StudyScreenEndpoint::OpenNoteEditor => {
                let note = self.target_note_id(data).await?;
                self.ui_round_trip(UiRequest::OpenNoteEditor(note)).await
            }
            StudyScreenEndpoint::Search => {
                let query = data.require_str("query")?;
                self.ui_round_trip(UiRequest::Search(query.to_string()))
                    .await
            }
            StudyScreenEndpoint::SetBackgroundColor => {
                let color = data.require_str("color")?;
                if !is_valid_color(color) {
                    return Err(ApiError::invalid(
                        "color",
                        "expected #RGB, #RRGGBB, #RRGGBBAA or rgba(r,g,b,a)",
                    ));
                }
                self.ui_round_trip(UiRequest::SetBackgroundColor(color.trim().to_string()))
                    .await
            }
        }
    }

    /// Forward `request` to the UI and wait for it to be handled.
    pub(super) async fn ui_round_trip(&self, request: UiRequest) -> HandlerResult {
        self.ui.request(request).await?;
        Ok(ApiResponse::empty())
    }
}

//! Request validation, routing and execution.

mod card;
mod deck;
mod device;
mod note;
mod study_screen;


use std::sync::Arc;

use cardbridge_common::{new_correlation_id, CardId, DeckId, NoteId};

use crate::backend::{Collection, ReviewerHost, Speech};
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::model::{Card, Deck, Note};
use crate::request::{parse_request, RequestData, RequestError};
use crate::response::{ApiResponse, Dispatch};
use crate::ui::UiBridge;

/// Result of a single endpoint handler.
type HandlerResult = Result<ApiResponse, ApiError>;

/// The JS-bridge API served to web content.
///
/// Stateless apart from its collaborators; safe to share across tasks.
#[derive(Clone)]
pub struct JsApi {
    collection: Arc<dyn Collection>,
    host: Arc<dyn ReviewerHost>,
    speech: Arc<dyn Speech>,
    ui: UiBridge,
}

impl JsApi {
    pub fn new(
        collection: Arc<dyn Collection>,
        host: Arc<dyn ReviewerHost>,
        speech: Arc<dyn Speech>,
        ui: UiBridge,
    ) -> Self {
        Self {
            collection,
            host,
            speech,
            ui,
        }
    }

    // =========================================================================
    // DISPATCH
    // =========================================================================

    /// Handle one request addressed to `path`.
    ///
    /// Contract violations (bad JSON, missing developer, wrong version) are
    /// returned as `Err` before the path is even looked at.
    pub async fn handle(&self, path: &str, body: &[u8]) -> Result<Dispatch, RequestError> {
        let request_id = new_correlation_id();

        let request = match parse_request(body) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(request_id = %request_id, path, error = %e, "JS API request rejected");
                return Err(e);
            }
        };

        let Some(endpoint) = Endpoint::resolve(path) else {
            tracing::warn!(
                request_id = %request_id,
                path,
                developer = %request.developer,
                "JS API request for unknown endpoint"
            );
            return Ok(Dispatch::NoSuchEndpoint);
        };

        tracing::debug!(
            request_id = %request_id,
            endpoint = %endpoint,
            developer = %request.developer,
            "JS API request dispatched"
        );

        let response = self.execute(endpoint, &request.data).await;
        if let Some(error) = &response.error {
            tracing::debug!(request_id = %request_id, endpoint = %endpoint, error = %error, "JS API request failed");
        }
        Ok(Dispatch::Response(response))
    }

    /// Run a resolved endpoint. Every failure becomes a `success: false`
    /// response.
    pub async fn execute(&self, endpoint: Endpoint, data: &RequestData) -> ApiResponse {
        let result = match endpoint {
            Endpoint::Card(e) => self.card_endpoint(e, data).await,
            Endpoint::Note(e) => self.note_endpoint(e, data).await,
            Endpoint::Deck(e) => self.deck_endpoint(e, data).await,
            Endpoint::StudyScreen(e) => self.study_screen_endpoint(e, data).await,
            Endpoint::Tts(e) => self.tts_endpoint(e, data),
            Endpoint::Android(e) => self.android_endpoint(e, data).await,
        };

        let response = result.unwrap_or_else(ApiResponse::from);
        debug_assert!(
            !response.success || response.value.is_some() == endpoint.returns_value(),
            "{endpoint} returned a value shape it does not declare"
        );
        response
    }

    // =========================================================================
    // TARGET RESOLUTION
    // =========================================================================

    fn top_card_id(&self) -> Result<CardId, ApiError> {
        self.host.top_card().ok_or(ApiError::NoTopCard)
    }

    /// The card named by `data.id`, else the top card of the queue.
    fn target_card_id(&self, data: &RequestData) -> Result<CardId, ApiError> {
        match data.id()? {
            Some(id) => Ok(CardId(id)),
            None => self.top_card_id(),
        }
    }

    async fn target_card(&self, data: &RequestData) -> Result<Card, ApiError> {
        let id = self.target_card_id(data)?;
        Ok(self.collection.card(id).await?)
    }

    /// The note named by `data.id`, else the top card's note.
    async fn target_note_id(&self, data: &RequestData) -> Result<NoteId, ApiError> {
        match data.id()? {
            Some(id) => Ok(NoteId(id)),
            None => {
                let card = self.collection.card(self.top_card_id()?).await?;
                Ok(card.note_id)
            }
        }
    }

    async fn target_note(&self, data: &RequestData) -> Result<Note, ApiError> {
        let id = self.target_note_id(data).await?;
        Ok(self.collection.note(id).await?)
    }

    /// The deck named by `data.id`, else the top card's deck.
    async fn target_deck(&self, data: &RequestData) -> Result<Deck, ApiError> {
        let id = match data.id()? {
            Some(id) => DeckId(id),
            None => self.collection.card(self.top_card_id()?).await?.deck_id,
        };
        Ok(self.collection.deck(id).await?)
    }
}

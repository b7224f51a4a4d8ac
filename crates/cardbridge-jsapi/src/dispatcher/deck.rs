use crate::endpoint::DeckEndpoint;
use crate::request::RequestData;
use crate::response::ApiResponse;

use super::{HandlerResult, JsApi};

impl JsApi {
    pub(super) async fn deck_endpoint(
        &self,
        endpoint: DeckEndpoint,
        data: &RequestData,
    ) -> HandlerResult {
        let deck = self.target_deck(data).await?;
        Ok(match endpoint {
            DeckEndpoint::GetId => ApiResponse::ok(deck.id.get()),
            DeckEndpoint::GetName => ApiResponse::ok(deck.name),
            DeckEndpoint::IsFiltered => ApiResponse::ok(deck.is_filtered),
        })
    }
}

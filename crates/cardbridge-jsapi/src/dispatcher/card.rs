use serde_json::Value;

use crate::endpoint::CardEndpoint;
use crate::error::ApiError;
use crate::model::{Card, CollectionOp, Flag};
use crate::request::RequestData;
use crate::response::ApiResponse;

use super::{HandlerResult, JsApi};

impl JsApi {
    pub(super) async fn card_endpoint(
        &self,
        endpoint: CardEndpoint,
        data: &RequestData,
    ) -> HandlerResult {
        match endpoint {
            CardEndpoint::GetId => self.card_value(data, |c| c.id.get().into()).await,
            CardEndpoint::GetNid => self.card_value(data, |c| c.note_id.get().into()).await,
            CardEndpoint::GetDid => self.card_value(data, |c| c.deck_id.get().into()).await,
            CardEndpoint::GetOdid => {
                self.card_value(data, |c| c.original_deck_id.get().into())
                    .await
            }
            CardEndpoint::GetFlag => self.card_value(data, |c| c.flag.code().into()).await,
            CardEndpoint::GetReps => self.card_value(data, |c| c.reps.into()).await,
            CardEndpoint::GetLapses => self.card_value(data, |c| c.lapses.into()).await,
            CardEndpoint::GetInterval => self.card_value(data, |c| c.interval.into()).await,
            CardEndpoint::GetFactor => self.card_value(data, |c| c.ease_factor.into()).await,
            CardEndpoint::GetMod => self.card_value(data, |c| c.modified.into()).await,
            CardEndpoint::GetType => self.card_value(data, |c| c.card_type.into()).await,
            CardEndpoint::GetQueue => self.card_value(data, |c| c.queue.into()).await,
            CardEndpoint::GetDue => self.card_value(data, |c| c.due.into()).await,
            CardEndpoint::GetOdue => self.card_value(data, |c| c.original_due.into()).await,
            CardEndpoint::Bury => {
                let id = self.target_card_id(data)?;
                self.run(CollectionOp::BuryCards(vec![id])).await
            }
            CardEndpoint::Suspend => {
                let id = self.target_card_id(data)?;
                self.run(CollectionOp::SuspendCards(vec![id])).await
            }
            CardEndpoint::ResetProgress => {
                let id = self.target_card_id(data)?;
                self.run(CollectionOp::ResetProgress(vec![id])).await
            }
            CardEndpoint::ToggleFlag => {
                let code = data.require_i64("flag")?;
                let requested = Flag::from_code(code)
                    .ok_or_else(|| ApiError::invalid("flag", "must be between 0 and 7"))?;
                let card = self.target_card(data).await?;
                self.run(CollectionOp::SetFlag {
                    cards: vec![card.id],
                    flag: card.flag.toggled(requested),
                })
                .await
            }
        }
    }

    async fn card_value(
        &self,
        data: &RequestData,
        read: impl FnOnce(&Card) -> Value,
    ) -> HandlerResult {
        let card = self.target_card(data).await?;
        Ok(ApiResponse::ok(read(&card)))
    }

    /// Run one undoable collection operation.
    pub(super) async fn run(&self, op: CollectionOp) -> HandlerResult {
        self.collection.run_undoable(op).await?;
        Ok(ApiResponse::empty())
    }
}

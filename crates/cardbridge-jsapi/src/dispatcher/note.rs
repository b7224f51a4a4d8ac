use crate::endpoint::NoteEndpoint;
use crate::model::CollectionOp;
use crate::request::RequestData;
use crate::response::ApiResponse;

use super::{HandlerResult, JsApi};

impl JsApi {
    pub(super) async fn note_endpoint(
        &self,
        endpoint: NoteEndpoint,
        data: &RequestData,
    ) -> HandlerResult {
        match endpoint {
            NoteEndpoint::GetId => {
                let note = self.target_note(data).await?;
                Ok(ApiResponse::ok(note.id.get()))
            }
            NoteEndpoint::GetNoteTypeId => {
                let note = self.target_note(data).await?;
                Ok(ApiResponse::ok(note.note_type_id.get()))
            }
            NoteEndpoint::GetCardIds => {
                let note = self.target_note(data).await?;
                let ids: Vec<i64> = note.card_ids.iter().map(|c| c.get()).collect();
                Ok(ApiResponse::ok(ids))
            }
            NoteEndpoint::GetTags => {
                let note = self.target_note(data).await?;
                Ok(ApiResponse::ok(note.tags))
            }
            NoteEndpoint::IsMarked => {
                let note = self.target_note(data).await?;
                Ok(ApiResponse::ok(note.is_marked()))
            }
            NoteEndpoint::SetTags => {
                let tags = data.require_string_list("tags")?;
                let note = self.target_note_id(data).await?;
                self.run(CollectionOp::SetNoteTags { note, tags }).await
            }
            NoteEndpoint::ToggleMark => {
                let note = self.target_note(data).await?;
                let tags = note.tags_with_mark_toggled();
                self.run(CollectionOp::SetNoteTags { note: note.id, tags })
                    .await
            }
            NoteEndpoint::Bury => {
                let note = self.target_note_id(data).await?;
                self.run(CollectionOp::BuryNote(note)).await
            }
            NoteEndpoint::Suspend => {
                let note = self.target_note_id(data).await?;
                self.run(CollectionOp::SuspendNote(note)).await
            }
        }
    }
}

//! Round trips to the UI host.
//!
//! Some endpoints need the UI to do something (flip the card, show a
//! snackbar). The dispatcher sends a [`UiRequest`] paired with a one-shot
//! completion and waits a bounded time for the UI to complete it. An
//! unanswered request resolves as [`ApiError::NotHandled`]; the waiting
//! receiver is dropped with it, so nothing stays registered.

use std::time::Duration;

use cardbridge_common::{CardId, NoteId};
use tokio::sync::{mpsc, oneshot};

use crate::error::ApiError;

/// Default bound on how long the dispatcher waits for the UI.
pub const DEFAULT_UI_TIMEOUT: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq)]
pub enum UiRequest {
    ShowAnswer,
    OpenCardInfo(CardId),
    OpenNoteEditor(NoteId),
    Search(String),
    SetBackgroundColor(String),
    ShowSnackbar {
        text: String,
        duration_ms: Option<u32>,
    },
}

/// A UI request waiting for the host to act on it.
#[derive(Debug)]
pub struct PendingUiRequest {
    pub request: UiRequest,
    reply: oneshot::Sender<()>,
}

impl PendingUiRequest {
    /// Mark the request handled. Returns `false` if the dispatcher
    /// already gave up on it.
    pub fn complete(self) -> bool {
        self.reply.send(()).is_ok()
    }

    /// Whether the dispatcher stopped waiting (timed out).
    pub fn is_abandoned(&self) -> bool {
        self.reply.is_closed()
    }
}

/// Dispatcher side of the UI channel.
#[derive(Debug, Clone)]
pub struct UiBridge {
    sender: mpsc::UnboundedSender<PendingUiRequest>,
    timeout: Duration,
}

/// UI host side of the UI channel.
#[derive(Debug)]
pub struct UiRequests {
    receiver: mpsc::UnboundedReceiver<PendingUiRequest>,
}

/// Create a connected bridge/listener pair.
pub fn channel(timeout: Duration) -> (UiBridge, UiRequests) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (UiBridge { sender, timeout }, UiRequests { receiver })
}

impl UiBridge {
    /// A bridge with no UI listening. Every request is unhandled.
    pub fn detached() -> Self {
        let (bridge, _requests) = channel(DEFAULT_UI_TIMEOUT);
        bridge
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn is_listening(&self) -> bool {
        !self.sender.is_closed()
    }

    /// Send `request` and wait for the UI to complete it.
    pub async fn request(&self, request: UiRequest) -> Result<(), ApiError> {
        let (reply, done) = oneshot::channel();

        if self.sender.send(PendingUiRequest { request, reply }).is_err() {
            tracing::warn!("UI request dropped: no UI listening");
            return Err(ApiError::NotHandled);
        }

        match tokio::time::timeout(self.timeout, done).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(_)) => {
                tracing::warn!("UI request discarded without being handled");
                Err(ApiError::NotHandled)
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "UI request timed out"
                );
                Err(ApiError::NotHandled)
            }
        }
    }
}

impl UiRequests {
    /// Next request from the dispatcher; `None` once every bridge is gone.
    pub async fn recv(&mut self) -> Option<PendingUiRequest> {
        self.receiver.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn completed_request_succeeds() {
        let (bridge, mut requests) = channel(DEFAULT_UI_TIMEOUT);
        let ui = tokio::spawn(async move {
            let pending = requests.recv().await.unwrap();
            assert_eq!(pending.request, UiRequest::ShowAnswer);
            assert!(pending.complete());
        });

        assert_eq!(bridge.request(UiRequest::ShowAnswer).await, Ok(()));
        ui.await.unwrap();
    }

    #[tokio::test]
    async fn detached_bridge_is_not_handled() {
        let bridge = UiBridge::detached();
        assert!(!bridge.is_listening());
        assert_eq!(
            bridge.request(UiRequest::ShowAnswer).await,
            Err(ApiError::NotHandled)
        );
    }

    #[tokio::test]
    async fn dropped_request_is_not_handled() {
        let (bridge, mut requests) = channel(DEFAULT_UI_TIMEOUT);
        let ui = tokio::spawn(async move {
            let pending = requests.recv().await.unwrap();
            drop(pending);
            requests
        });

        assert_eq!(
            bridge.request(UiRequest::Search("deck:current".into())).await,
            Err(ApiError::NotHandled)
        );
        let _requests = ui.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn unanswered_request_times_out() {
        let (bridge, mut requests) = channel(Duration::from_millis(2000));

        let started = tokio::time::Instant::now();
        let result = bridge.request(UiRequest::ShowAnswer).await;
        assert_eq!(result, Err(ApiError::NotHandled));
        assert!(started.elapsed() >= Duration::from_millis(2000));

        // The late completion finds nobody waiting.
        let pending = requests.recv().await.unwrap();
        assert!(pending.is_abandoned());
        assert!(!pending.complete());
    }
}

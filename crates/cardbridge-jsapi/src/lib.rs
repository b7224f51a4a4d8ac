//! JavaScript bridge API for content embedded in the card viewer.
//!
//! Web content sends `{version, developer, data}` requests to a path like
//! `card/get-due`. [`JsApi`] checks the request contract, resolves the path
//! to an [`Endpoint`], runs it against the [`Collection`] and answers with
//! an [`ApiResponse`].

pub mod backend;
pub mod color;
pub mod dispatcher;
pub mod endpoint;
pub mod error;
pub mod memory;
pub mod model;
pub mod request;
pub mod response;
pub mod ui;

pub use backend::{Collection, QueueMode, ReviewerHost, Speech};
pub use dispatcher::JsApi;
pub use endpoint::Endpoint;
pub use error::{ApiError, BackendError};
pub use memory::{CollectionSnapshot, MemoryCollection};
pub use model::{Card, CollectionOp, Deck, Flag, Note, QueueCounts, Rating};
pub use request::{parse_request, ApiRequest, RequestData, RequestError, API_VERSION};
pub use response::{ApiResponse, Dispatch};
pub use ui::{PendingUiRequest, UiBridge, UiRequest, UiRequests};

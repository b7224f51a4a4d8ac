//! Subcommand implementations.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use cardbridge_common::{BridgeError, CardId};
use cardbridge_config::BridgeConfig;
use cardbridge_gestures::{GestureBindings, GestureClassifier, ScrollAxes, TouchEvent};
use cardbridge_jsapi::{ui, Dispatch, Endpoint, JsApi, MemoryCollection, API_VERSION};

use crate::cli::{CallArgs, ClassifyArgs};
use crate::demo::{self, DemoHost, LoggingSpeech};

/// Developer contact used when no request body is given.
const CLI_DEVELOPER: &str = "cardbridge-cli";

fn default_request() -> String {
    serde_json::json!({
        "version": API_VERSION,
        "developer": CLI_DEVELOPER,
        "data": {}
    })
    .to_string()
}

// =============================================================================
// CALL
// =============================================================================

pub async fn call(config: &BridgeConfig, args: CallArgs) -> Result<ExitCode, BridgeError> {
    let collection = Arc::new(match &args.collection {
        Some(path) => {
            tracing::info!("Loading collection from {}", path.display());
            MemoryCollection::from_json_file(path)?
        }
        None => MemoryCollection::demo(),
    });

    let top = match args.top_card {
        Some(id) => Some(CardId(id)),
        None => collection.first_queued_card().await,
    };
    tracing::debug!(top_card = ?top, "Study queue ready");

    let timeout = Duration::from_millis(u64::from(config.api.ui_timeout_ms));
    let (bridge, requests) = ui::channel(timeout);
    // With --no-ui the listener is kept alive but never polled, so UI
    // endpoints run into the timeout.
    let (_silent_ui, ui_task) = if args.no_ui {
        (Some(requests), None)
    } else {
        (None, Some(demo::spawn_ui(requests)))
    };

    let api = JsApi::new(
        collection,
        Arc::new(DemoHost {
            top,
            showing_answer: false,
        }),
        Arc::new(LoggingSpeech),
        bridge,
    );

    let body = args.request.unwrap_or_else(default_request);
    let outcome = api.handle(&args.path, body.as_bytes()).await;
    drop(api);
    if let Some(task) = ui_task {
        if let Err(e) = task.await {
            tracing::warn!("UI task failed: {e}");
        }
    }

    match outcome {
        Ok(Dispatch::Response(response)) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(ExitCode::SUCCESS)
        }
        Ok(Dispatch::NoSuchEndpoint) => {
            eprintln!("no such endpoint: {}", args.path);
            Ok(ExitCode::from(2))
        }
        Err(e) => {
            eprintln!("request rejected: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}

// =============================================================================
// CLASSIFY
// =============================================================================

pub fn classify(config: &BridgeConfig, args: &ClassifyArgs) -> ExitCode {
    let mut gestures = config.gestures.clone();
    if let Some(mode) = args.mode {
        gestures.tap_mode = mode.into();
    }
    let classifier = GestureClassifier::from_config(&gestures);
    let bindings = GestureBindings::from_config(&gestures.bindings);

    let event = TouchEvent {
        x: args.x,
        y: args.y,
        delta_x: args.dx,
        delta_y: args.dy,
        scroll_x: args.scroll_x,
        scroll_y: args.scroll_y,
        viewport_width: args.width,
        viewport_height: args.height,
        scale: args.scale,
        native_scroll: ScrollAxes::from_hint(args.scroll_hint.as_deref()),
        is_double_tap: args.double_tap,
        is_scrolling: args.scrolling,
    };

    match classifier.classify(&event) {
        Ok(Some(gesture)) => {
            match bindings.lookup(gesture) {
                Some(command) => println!("{gesture} -> {}", command.label()),
                None => println!("{gesture} (unbound)"),
            }
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("none");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("classification failed: {e}");
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// ENDPOINTS
// =============================================================================

pub fn endpoints() -> ExitCode {
    for endpoint in Endpoint::all() {
        let kind = if endpoint.returns_value() {
            "value"
        } else {
            "action"
        };
        println!("{:<40} {kind}", endpoint.path());
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_request_passes_the_contract() {
        let request = cardbridge_jsapi::parse_request(default_request().as_bytes()).unwrap();
        assert_eq!(request.developer, CLI_DEVELOPER);
        assert_eq!(request.version, API_VERSION);
    }

    #[tokio::test]
    async fn call_against_demo_collection() {
        let args = CallArgs {
            path: "deck/get-name".into(),
            request: None,
            collection: None,
            top_card: None,
            no_ui: false,
        };
        assert!(call(&BridgeConfig::default(), args).await.is_ok());
    }

    #[tokio::test]
    async fn missing_collection_file_is_an_error() {
        let args = CallArgs {
            path: "card/get-id".into(),
            request: None,
            collection: Some("/nonexistent/cardbridge/collection.json".into()),
            top_card: None,
            no_ui: true,
        };
        assert!(matches!(
            call(&BridgeConfig::default(), args).await,
            Err(BridgeError::Io(_))
        ));
    }
}

mod cli;
mod commands;
mod demo;

use std::process::ExitCode;

use cardbridge_config::BridgeConfig;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command};

const DEFAULT_LOG_DIRECTIVE: &str = "cardbridge=info";

fn load_config(args: &Args) -> Result<BridgeConfig, cardbridge_common::ConfigError> {
    match &args.config {
        Some(path) => cardbridge_config::load_config_from(path),
        None => cardbridge_config::load_config(),
    }
}

fn init_logging(directive: &str) {
    let directive = directive
        .parse::<Directive>()
        .or_else(|_| DEFAULT_LOG_DIRECTIVE.parse::<Directive>());
    let filter = match directive {
        Ok(d) => EnvFilter::from_default_env().add_directive(d),
        Err(_) => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    // Config is read before logging exists so its level can apply; any
    // load failure is reported once the subscriber is up.
    let loaded = load_config(&args);
    let config_directive = loaded
        .as_ref()
        .map(|c| format!("cardbridge={}", c.logging.level.as_directive()))
        .unwrap_or_else(|_| DEFAULT_LOG_DIRECTIVE.to_string());
    init_logging(args.log_level.as_deref().unwrap_or(&config_directive));

    tracing::debug!("cardbridge v{} starting", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        BridgeConfig::default()
    });

    match args.command {
        Command::Call(call) => match commands::call(&config, call).await {
            Ok(code) => code,
            Err(e) => {
                tracing::error!("Call failed: {e}");
                eprintln!("error: {e}");
                ExitCode::FAILURE
            }
        },
        Command::Classify(classify) => commands::classify(&config, &classify),
        Command::Endpoints => commands::endpoints(),
    }
}

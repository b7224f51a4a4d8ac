use std::path::PathBuf;

use cardbridge_config::schema::TapModeSetting;
use clap::{Parser, Subcommand, ValueEnum};

/// cardbridge: JS bridge API and gesture recognition for an embedded card viewer.
#[derive(Parser, Debug)]
#[command(name = "cardbridge", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Dispatch one request against an in-memory collection.
    Call(CallArgs),
    /// Classify a touch event and show the command bound to it.
    Classify(ClassifyArgs),
    /// List every endpoint path.
    Endpoints,
}

#[derive(clap::Args, Debug)]
pub struct CallArgs {
    /// Endpoint path, e.g. `card/get-due`.
    pub path: String,

    /// Full request JSON. Defaults to an empty request from the CLI.
    pub request: Option<String>,

    /// Load the collection from a JSON snapshot instead of the demo one.
    #[arg(long)]
    pub collection: Option<PathBuf>,

    /// Card at the top of the study queue. Defaults to the first queued card.
    #[arg(long)]
    pub top_card: Option<i64>,

    /// Run without a UI; UI endpoints time out.
    #[arg(long)]
    pub no_ui: bool,
}

#[derive(clap::Args, Debug)]
pub struct ClassifyArgs {
    #[arg(long)]
    pub x: f64,
    #[arg(long)]
    pub y: f64,
    #[arg(long)]
    pub width: f64,
    #[arg(long)]
    pub height: f64,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub dx: f64,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub dy: f64,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub scroll_x: f64,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub scroll_y: f64,
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,

    /// Axes the content scrolls natively on (`h`, `v`, `hv`).
    #[arg(long)]
    pub scroll_hint: Option<String>,

    /// Tap zone layout; defaults to the configured one.
    #[arg(long, value_enum)]
    pub mode: Option<TapModeArg>,

    #[arg(long)]
    pub double_tap: bool,

    #[arg(long)]
    pub scrolling: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapModeArg {
    Nine,
    Four,
}

impl From<TapModeArg> for TapModeSetting {
    fn from(arg: TapModeArg) -> Self {
        match arg {
            TapModeArg::Nine => TapModeSetting::Nine,
            TapModeArg::Four => TapModeSetting::Four,
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_call() {
        let args = Args::try_parse_from([
            "cardbridge",
            "--log-level",
            "debug",
            "call",
            "card/get-due",
            "--no-ui",
            "--top-card",
            "42",
        ])
        .unwrap();
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        match args.command {
            Command::Call(call) => {
                assert_eq!(call.path, "card/get-due");
                assert!(call.request.is_none());
                assert!(call.no_ui);
                assert_eq!(call.top_card, Some(42));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_classify_with_negative_delta() {
        let args = Args::try_parse_from([
            "cardbridge",
            "classify",
            "--x",
            "150",
            "--y",
            "150",
            "--width",
            "300",
            "--height",
            "300",
            "--dx",
            "-40",
            "--scroll-hint",
            "h",
            "--mode",
            "four",
        ])
        .unwrap();
        match args.command {
            Command::Classify(c) => {
                assert_eq!(c.dx, -40.0);
                assert_eq!(c.dy, 0.0);
                assert_eq!(c.scale, 1.0);
                assert_eq!(c.scroll_hint.as_deref(), Some("h"));
                assert_eq!(c.mode, Some(TapModeArg::Four));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_config_flag_after_subcommand() {
        let args = Args::try_parse_from(["cardbridge", "endpoints", "--config", "/tmp/c.toml"])
            .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/tmp/c.toml")));
        assert!(matches!(args.command, Command::Endpoints));
    }
}

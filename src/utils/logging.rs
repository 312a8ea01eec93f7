use crate::models::config::LoggingConfig;
use std::io::IsTerminal;
use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, registry};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Install the global tracing subscriber.
///
/// Logs go to stderr so stdout stays free for JSON reports.
pub fn init_logging(config: &LoggingConfig) -> Result<(), String> {
    let level: Level = config
        .level
        .parse()
        .map_err(|_| format!("Invalid log level: {}", config.level))?;

    let filter = Targets::new()
        .with_default(LevelFilter::from_level(level))
        .with_target("hyper", LevelFilter::WARN)
        .with_target("hyper_util", LevelFilter::WARN)
        .with_target("reqwest", LevelFilter::WARN);

    let timer = fmt::time::ChronoLocal::new(TIME_FORMAT.to_string());

    let result = if config.json {
        let layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_timer(timer)
            .with_filter(filter);
        tracing::subscriber::set_global_default(registry().with(layer))
    } else {
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(use_ansi())
            .with_timer(timer)
            .with_filter(filter);
        tracing::subscriber::set_global_default(registry().with(layer))
    };

    result.map_err(|e| format!("Failed to install logger: {}", e))
}

/// Colour only when stderr is an interactive terminal
fn use_ansi() -> bool {
    std::io::stderr().is_terminal()
}

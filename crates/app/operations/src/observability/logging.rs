//! Structured logging through `tracing-subscriber`.
//!
//! `RUST_LOG` takes precedence over the configured level, so a single run can
//! be made more verbose without touching the config file.

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

use crate::errors::LoggingError;

/// Level names accepted by [`parse_level`].
pub(crate) const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "warning", "error"];

/// Format names accepted by [`LogFormat`]'s `FromStr`.
pub(crate) const LOG_FORMATS: [&str; 4] = ["json", "pretty", "text", "human"];

/// Log format for output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// JSON format for machine parsing.
    #[default]
    Json,
    /// Human-readable format.
    Pretty,
}

impl std::str::FromStr for LogFormat {
    type Err = std::convert::Infallible;

    /// Parse from string, case-insensitive. Defaults to Json for unknown values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "pretty" | "text" | "human" => Self::Pretty,
            _ => Self::Json,
        })
    }
}

/// Parse log level from string. Unknown names fall back to `INFO`.
pub fn parse_level(s: &str) -> Level {
    match s.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Initialize logging from configuration strings.
pub fn init_logging_from_config(level: &str, format: &str) -> Result<(), LoggingError> {
    let format: LogFormat = format.parse().unwrap_or_default();
    init_logging(parse_level(level), format)
}

/// Install the global subscriber.
///
/// Fails instead of panicking when a subscriber is already installed.
pub fn init_logging(level: Level, format: LogFormat) -> Result<(), LoggingError> {
    let filter = env_filter(level);
    let result = match format {
        LogFormat::Json => fmt().json().with_env_filter(filter).try_init(),
        LogFormat::Pretty => fmt().pretty().with_env_filter(filter).try_init(),
    };
    result.map_err(|e| LoggingError::Init(e.to_string()))
}

fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), Level::TRACE);
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level("Info"), Level::INFO);
        assert_eq!(parse_level("WARN"), Level::WARN);
        assert_eq!(parse_level("warning"), Level::WARN);
        assert_eq!(parse_level("error"), Level::ERROR);
        assert_eq!(parse_level("unknown"), Level::INFO);
    }

    #[test]
    fn test_every_accepted_level_name_parses() {
        for name in LOG_LEVELS {
            let level = parse_level(name);
            assert!(name == "info" || level != Level::INFO, "{name}");
        }
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("unknown".parse::<LogFormat>().unwrap(), LogFormat::Json);
    }

    #[test]
    fn test_second_init_returns_error() {
        let _ = init_logging(Level::INFO, LogFormat::Json);
        let second = init_logging(Level::DEBUG, LogFormat::Pretty);
        assert!(matches!(second, Err(LoggingError::Init(_))));
    }
}

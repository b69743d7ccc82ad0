//! Logging initialisation via tracing-subscriber.
//!
//! Levels are validated with [`parse_level`] when config loads, so [`init`]
//! only ever sees a real [`LevelFilter`]. Log lines go to stderr so they never
//! interleave with console replies.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Install the global subscriber. Call once, after the effective level is known.
///
/// With `prefer_level` (a CLI `-v` flag was given) `level` wins outright.
/// Otherwise `RUST_LOG` wins when set, and `level` is the default directive.
pub fn init(level: LevelFilter, prefer_level: bool) -> Result<(), AppError> {
    let filter = build_filter(level, prefer_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| AppError::Logger(format!("failed to set subscriber: {e}")))
}

fn build_filter(level: LevelFilter, prefer_level: bool) -> Result<EnvFilter, AppError> {
    if prefer_level {
        return Ok(EnvFilter::new(level.to_string()));
    }
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env()
        .map_err(|e| AppError::Logger(format!("invalid RUST_LOG: {e}")))
}

/// Parse a level name (`error`, `warn`, `info`, `debug`, `trace`, `off`).
///
/// Anything else is rejected here; `EnvFilter` would otherwise read it as a
/// target name and silence every line.
pub fn parse_level(level: &str) -> Result<LevelFilter, AppError> {
    if level.is_empty() {
        return Err(AppError::Logger("log level must not be empty".into()));
    }
    level
        .parse::<LevelFilter>()
        .map_err(|_| AppError::Logger(format!("unrecognised log level: '{level}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_levels_parse() {
        assert_eq!(parse_level("warn").unwrap(), LevelFilter::WARN);
        assert_eq!(parse_level("DEBUG").unwrap(), LevelFilter::DEBUG);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::OFF);
    }

    #[test]
    fn invalid_level_errors() {
        assert!(parse_level("verbose").is_err());
        assert!(parse_level("").is_err());
    }

    #[test]
    fn preferred_level_ignores_env() {
        let filter = build_filter(LevelFilter::TRACE, true).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn init_succeeds_or_already_init() {
        // Another test in this process may have installed a subscriber first.
        match init(LevelFilter::INFO, false) {
            Ok(()) => {}
            Err(AppError::Logger(msg)) if msg.contains("set subscriber") => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
}

//! Structured logging.

use crate::config::LoggingSettings;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parses a format name, falling back to [`LogFormat::Pretty`].
    #[must_use]
    pub fn parse(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

/// Logging configuration.
#[derive(Debug)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// Event filter.
    pub filter: EnvFilter,
    /// Log file; stderr when `None`.
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Builds the logging configuration.
    ///
    /// `RUST_LOG` wins over the configured filter. Without either, the level
    /// is `info` for this crate (`debug` when `verbose`) and `warn` elsewhere.
    #[must_use]
    pub fn from_settings(settings: Option<&LoggingSettings>, verbose: bool) -> Self {
        let format = settings
            .and_then(|s| s.format.as_deref())
            .map(LogFormat::parse)
            .unwrap_or_default();
        let file = settings
            .and_then(|s| s.file.as_deref())
            .filter(|f| !f.trim().is_empty())
            .map(PathBuf::from);

        let directive = settings
            .and_then(|s| s.filter.clone())
            .unwrap_or_else(|| default_directive(verbose));
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&directive))
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

        Self {
            format,
            filter,
            file,
        }
    }

    /// Overrides the output format.
    #[must_use]
    pub const fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Overrides the log file.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }
}

fn default_directive(verbose: bool) -> String {
    if verbose {
        "warn,csvboard=debug".to_string()
    } else {
        "warn,csvboard=info".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("xml"), LogFormat::Pretty);
    }

    #[test]
    fn test_from_settings() {
        let settings = LoggingSettings {
            format: Some("json".to_string()),
            file: Some("/tmp/csvboard.log".to_string()),
            filter: None,
        };
        let config = LoggingConfig::from_settings(Some(&settings), false);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.file, Some(PathBuf::from("/tmp/csvboard.log")));

        let config = LoggingConfig::from_settings(None, true);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.file.is_none());
    }
}

//! Configuration management.
//!
//! A [`RunConfig`] is built once per process and then passed explicitly to
//! the import and export paths. Sources, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. A TOML file (`--config`, `CSVBOARD_CONFIG`, or the platform config dir)
//! 3. Environment variables (a `.env` file is loaded by the binary)
//! 4. Command-line flags
//!
//! | Environment variable | TOML key | Effect |
//! |----------------------|----------|--------|
//! | `CSV_FILENAME` | `csv_filename` | CSV file to import |
//! | `OUTPUT_BLACKBOARD` | `output_blackboard` | Blackboard written by import |
//! | `OUTPUT_TAGS` | `output_tags` | Comma-separated tags for imported documents |
//! | `INPUT_BLACKBOARD` | `input_blackboard` | Blackboard read by export |
//! | `INPUT_TAGS` | `input_tags` | Reserved; not applied by export |
//! | `INPUT_FIELDS` | `input_fields` | Comma-separated export whitelist |
//! | `TXT_FILENAME` | `txt_filename` | Export file; empty disables the file sink |
//! | `ON_SCREEN` | `on_screen` | `TRUE` enables the console sink |
//! | `ROW_LIMIT` | `row_limit` | Row cap for import and export; `<= 0` is unbounded |
//! | `TRUNCATE_AT` | `truncate_at` | Export value length cap; `<= 0` disables |
//! | `CSVBOARD_DATA_DIR` | `data_dir` | Directory holding blackboard databases |

use crate::io::{ExportOptions, ImportOptions, parse_tag_list};
use crate::models::RowLimit;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Blackboard used when none is configured.
pub const DEFAULT_BLACKBOARD: &str = "default";

/// Import settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    /// CSV file to import.
    pub csv_filename: Option<PathBuf>,
    /// Blackboard to write to.
    pub output_blackboard: String,
    /// Tags attached to every imported document.
    pub output_tags: Vec<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            csv_filename: None,
            output_blackboard: DEFAULT_BLACKBOARD.to_string(),
            output_tags: Vec::new(),
        }
    }
}

impl ImportConfig {
    /// Builds import options using the process-wide row cap.
    #[must_use]
    pub fn to_options(&self, row_limit: RowLimit) -> ImportOptions {
        ImportOptions::default()
            .with_tags(self.output_tags.iter().cloned())
            .with_row_limit(row_limit)
    }
}

/// Export settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Blackboard to read from.
    pub input_blackboard: String,
    /// Declared tag filter. Parsed but not applied when exporting.
    pub input_tags: Vec<String>,
    /// Field whitelist; empty exports every field.
    pub input_fields: Vec<String>,
    /// Export file.
    pub txt_filename: Option<PathBuf>,
    /// Print to the console.
    pub on_screen: bool,
    /// Value length cap in characters; `0` disables truncation.
    pub truncate_at: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            input_blackboard: DEFAULT_BLACKBOARD.to_string(),
            input_tags: Vec::new(),
            input_fields: Vec::new(),
            txt_filename: None,
            on_screen: false,
            truncate_at: 0,
        }
    }
}

impl ExportConfig {
    /// Builds export options using the process-wide row cap.
    #[must_use]
    pub fn to_options(&self, row_limit: RowLimit) -> ExportOptions {
        let options = ExportOptions::default()
            .with_fields(self.input_fields.iter().cloned())
            .with_row_limit(row_limit)
            .with_truncate_at(self.truncate_at)
            .with_console(self.on_screen);
        match &self.txt_filename {
            Some(path) => options.with_file(path),
            None => options,
        }
    }
}

/// Logging settings from the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoggingSettings {
    /// `pretty` or `json`.
    pub format: Option<String>,
    /// Log file; logs go to stderr when unset.
    pub file: Option<String>,
    /// `tracing` filter directive, e.g. `csvboard=debug`.
    pub filter: Option<String>,
}

/// Main configuration for a csvboard run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Directory holding blackboard databases.
    pub data_dir: PathBuf,
    /// Row cap shared by import and export.
    pub row_limit: RowLimit,
    /// Import settings.
    pub import: ImportConfig,
    /// Export settings.
    pub export: ExportConfig,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// A boolean option written either as a TOML boolean or as text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    /// `on_screen = true`
    Bool(bool),
    /// `on_screen = "TRUE"`
    Text(String),
}

impl FlagValue {
    /// Returns the flag state; text is true only for `TRUE` (any case).
    #[must_use]
    pub fn is_set(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Text(s) => parse_flag(s),
        }
    }
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Data directory.
    pub data_dir: Option<String>,
    /// Row cap.
    pub row_limit: Option<i64>,
    /// CSV file to import.
    pub csv_filename: Option<String>,
    /// Blackboard written by import.
    pub output_blackboard: Option<String>,
    /// Comma-separated import tags.
    pub output_tags: Option<String>,
    /// Blackboard read by export.
    pub input_blackboard: Option<String>,
    /// Comma-separated tag filter (reserved).
    pub input_tags: Option<String>,
    /// Comma-separated export whitelist.
    pub input_fields: Option<String>,
    /// Export file.
    pub txt_filename: Option<String>,
    /// Console output flag.
    pub on_screen: Option<FlagValue>,
    /// Value length cap.
    pub truncate_at: Option<i64>,
    /// Logging section.
    pub logging: Option<LoggingSettings>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            row_limit: RowLimit::unbounded(),
            import: ImportConfig::default(),
            export: ExportConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl RunConfig {
    /// Loads configuration from a file (or the default location) and applies
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or an
    /// environment variable holds a malformed value.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load_default()?,
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid configuration TOML.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| Error::operation("parse_config_file", e))?;
        Ok(Self::from_config_file(file))
    }

    /// Loads `csvboard/config.toml` from the platform config directory, or
    /// the defaults if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_default() -> Result<Self> {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Ok(Self::default());
        };

        let platform_config = base_dirs.config_dir().join("csvboard").join("config.toml");
        if platform_config.exists() {
            tracing::debug!(path = %platform_config.display(), "Loading configuration");
            return Self::load_from_file(&platform_config);
        }

        Ok(Self::default())
    }

    /// Converts a `ConfigFile` to `RunConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(data_dir) = file.data_dir {
            config.data_dir = PathBuf::from(data_dir);
        }
        if let Some(limit) = file.row_limit {
            config.row_limit = RowLimit::from_raw(limit);
        }
        if let Some(csv) = file.csv_filename {
            config.import.csv_filename = non_empty_path(&csv);
        }
        if let Some(name) = file.output_blackboard {
            config.import.output_blackboard = name;
        }
        if let Some(tags) = file.output_tags {
            config.import.output_tags = parse_tag_list(&tags);
        }
        if let Some(name) = file.input_blackboard {
            config.export.input_blackboard = name;
        }
        if let Some(tags) = file.input_tags {
            config.export.input_tags = parse_tag_list(&tags);
        }
        if let Some(fields) = file.input_fields {
            config.export.input_fields = parse_field_list(&fields);
        }
        if let Some(txt) = file.txt_filename {
            config.export.txt_filename = non_empty_path(&txt);
        }
        if let Some(flag) = file.on_screen {
            config.export.on_screen = flag.is_set();
        }
        if let Some(limit) = file.truncate_at {
            config.export.truncate_at = non_negative(limit);
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }

        config
    }

    /// Applies overrides from a variable lookup, typically the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `ROW_LIMIT` or `TRUNCATE_AT` is
    /// not an integer.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("CSVBOARD_DATA_DIR").filter(|d| !d.trim().is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(limit) = lookup("ROW_LIMIT") {
            self.row_limit = RowLimit::from_raw(parse_integer("ROW_LIMIT", &limit)?);
        }
        if let Some(csv) = lookup("CSV_FILENAME") {
            self.import.csv_filename = non_empty_path(&csv);
        }
        if let Some(name) = lookup("OUTPUT_BLACKBOARD") {
            self.import.output_blackboard = name;
        }
        if let Some(tags) = lookup("OUTPUT_TAGS") {
            self.import.output_tags = parse_tag_list(&tags);
        }
        if let Some(name) = lookup("INPUT_BLACKBOARD") {
            self.export.input_blackboard = name;
        }
        if let Some(tags) = lookup("INPUT_TAGS") {
            self.export.input_tags = parse_tag_list(&tags);
        }
        if let Some(fields) = lookup("INPUT_FIELDS") {
            self.export.input_fields = parse_field_list(&fields);
        }
        if let Some(txt) = lookup("TXT_FILENAME") {
            self.export.txt_filename = non_empty_path(&txt);
        }
        if let Some(flag) = lookup("ON_SCREEN") {
            self.export.on_screen = parse_flag(&flag);
        }
        if let Some(limit) = lookup("TRUNCATE_AT") {
            self.export.truncate_at = non_negative(parse_integer("TRUNCATE_AT", &limit)?);
        }
        Ok(())
    }
}

/// Returns the platform data directory for blackboards.
///
/// - macOS: `~/Library/Application Support/csvboard/`
/// - Linux: `~/.local/share/csvboard/`
/// - Windows: `C:\Users\<User>\AppData\Local\csvboard\`
///
/// Falls back to `.csvboard` when no home directory is available.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from(".csvboard"),
        |b| b.data_local_dir().join("csvboard"),
    )
}

/// Parses a whitelist option; names are trimmed and empty entries dropped.
#[must_use]
pub fn parse_field_list(text: &str) -> Vec<String> {
    parse_tag_list(text)
}

/// Returns `true` only for `TRUE`, ignoring case and surrounding whitespace.
#[must_use]
pub fn parse_flag(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case("true")
}

fn parse_integer(key: &str, text: &str) -> Result<i64> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| Error::InvalidInput(format!("{key} must be an integer, got '{text}'")))
}

fn non_negative(value: i64) -> usize {
    usize::try_from(value).unwrap_or(0)
}

fn non_empty_path(text: &str) -> Option<PathBuf> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
}

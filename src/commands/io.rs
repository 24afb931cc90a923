//! Import and export command handlers.

use anyhow::{Context, Result, bail};
use csvboard::RunConfig;
use csvboard::io::{ExportService, ImportService};
use csvboard::models::RunReport;
use csvboard::storage::open_blackboard;

/// Executes the import command.
pub fn cmd_import(config: &RunConfig) -> Result<RunReport> {
    let Some(file) = config.import.csv_filename.as_deref() else {
        bail!("no CSV file configured (set CSV_FILENAME or pass --file)");
    };

    let store = open_blackboard(&config.import.output_blackboard, &config.data_dir)
        .with_context(|| {
            format!(
                "failed to open blackboard '{}'",
                config.import.output_blackboard
            )
        })?;

    let options = config.import.to_options(config.row_limit);
    ImportService::new(store)
        .import_from_file(file, &options)
        .with_context(|| format!("import of '{}' failed", file.display()))
}

/// Executes the export command.
pub fn cmd_export(config: &RunConfig) -> Result<RunReport> {
    if !config.export.input_tags.is_empty() {
        tracing::debug!(
            tags = ?config.export.input_tags,
            "INPUT_TAGS is not applied when exporting"
        );
    }

    let store = open_blackboard(&config.export.input_blackboard, &config.data_dir)
        .with_context(|| {
            format!(
                "failed to open blackboard '{}'",
                config.export.input_blackboard
            )
        })?;

    let options = config.export.to_options(config.row_limit);
    ExportService::new(store)
        .export(&options)
        .with_context(|| {
            format!(
                "export of blackboard '{}' failed",
                config.export.input_blackboard
            )
        })
}

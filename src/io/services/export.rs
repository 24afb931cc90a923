//! Text export service.
//!
//! Walks the blackboard, projects each document and renders `name:value`
//! blocks to the enabled sinks.

use crate::io::formats::text::{ConsoleSink, FileSink, format_line, render_value};
use crate::io::projection::project;
use crate::io::traits::TextSink;
use crate::models::{RowLimit, RunReport};
use crate::storage::Blackboard;
use crate::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::instrument;

/// Options for text export.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Field whitelist; empty exports every field.
    pub fields: Vec<String>,
    /// Maximum number of documents to export.
    pub row_limit: RowLimit,
    /// Maximum rendered value length in characters; `0` disables truncation.
    pub truncate_at: usize,
    /// Print to standard output.
    pub to_console: bool,
    /// Destination file, replaced on every run.
    pub to_file: Option<PathBuf>,
}

impl ExportOptions {
    /// Sets the field whitelist.
    #[must_use]
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the row limit.
    #[must_use]
    pub const fn with_row_limit(mut self, row_limit: RowLimit) -> Self {
        self.row_limit = row_limit;
        self
    }

    /// Sets the truncation length.
    #[must_use]
    pub const fn with_truncate_at(mut self, truncate_at: usize) -> Self {
        self.truncate_at = truncate_at;
        self
    }

    /// Enables or disables the console sink.
    #[must_use]
    pub const fn with_console(mut self, to_console: bool) -> Self {
        self.to_console = to_console;
        self
    }

    /// Sets the destination file.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.to_file = Some(path.into());
        self
    }

    /// Returns `true` if console output collapses line breaks.
    #[must_use]
    pub const fn truncation_enabled(&self) -> bool {
        self.truncate_at > 0
    }
}

/// Service for exporting blackboard documents as text.
pub struct ExportService {
    store: Arc<dyn Blackboard>,
}

impl ExportService {
    /// Creates a new export service.
    #[must_use]
    pub fn new(store: Arc<dyn Blackboard>) -> Self {
        Self { store }
    }

    /// Exports to the sinks enabled in `options`.
    ///
    /// The console sink writes to standard output. The file sink is written
    /// once, after every document has been rendered.
    ///
    /// # Errors
    ///
    /// Returns an error if iteration or any sink fails.
    #[instrument(skip(self, options), fields(console = options.to_console, file = ?options.to_file))]
    pub fn export(&self, options: &ExportOptions) -> Result<RunReport> {
        let mut console = options
            .to_console
            .then(|| ConsoleSink::stdout(options.truncation_enabled()));
        let mut file = options.to_file.as_ref().map(FileSink::new);

        let mut sinks: Vec<&mut dyn TextSink> = Vec::new();
        if let Some(sink) = console.as_mut() {
            sinks.push(sink);
        }
        if let Some(sink) = file.as_mut() {
            sinks.push(sink);
        }
        if sinks.is_empty() {
            tracing::warn!("No export sink enabled, documents are counted only");
        }

        self.export_to_sinks(options, &mut sinks)
    }

    /// Exports to caller-supplied sinks.
    ///
    /// Only the projection, truncation and row limit of `options` apply here;
    /// its sink settings are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if iteration or any sink fails.
    pub fn export_to_sinks(
        &self,
        options: &ExportOptions,
        sinks: &mut [&mut dyn TextSink],
    ) -> Result<RunReport> {
        let mut report = RunReport::default();
        let mut documents = self.store.iterate_documents()?;

        while options.row_limit.allows(report.items_read) {
            let Some(document) = documents.next() else {
                break;
            };
            let document = document?;
            report.items_read += 1;

            for (name, value) in project(&document, &options.fields) {
                let line = format_line(name, &render_value(value, options.truncate_at));
                for sink in sinks.iter_mut() {
                    sink.write_line(&line)?;
                }
            }
            for sink in sinks.iter_mut() {
                sink.write_line("")?;
            }
        }
        drop(documents);

        for sink in sinks.iter_mut() {
            sink.finalize()?;
        }

        tracing::info!(documents_read = report.items_read, "Text export complete");
        Ok(report)
    }
}

//! Typed CSV import service.
//!
//! Loads a header-delimited CSV file into the blackboard, one document per
//! data row, inferring a numeric or text type for every cell.

use crate::io::formats::csv::{parse_number, split_line};
use crate::io::services::tags::TagResolver;
use crate::models::{Document, FieldValue, RowLimit, RunReport};
use crate::storage::Blackboard;
use crate::{Error, Result};
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use tracing::instrument;

/// Options for CSV import.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Tag names attached to every imported document.
    pub tags: Vec<String>,
    /// Maximum number of data rows to read.
    pub row_limit: RowLimit,
}

impl ImportOptions {
    /// Sets the tag names.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the row limit.
    #[must_use]
    pub const fn with_row_limit(mut self, row_limit: RowLimit) -> Self {
        self.row_limit = row_limit;
        self
    }
}

/// Builds the document for one data row.
///
/// Cell `i` is named by label `i`. A numeric cell under an empty label is
/// dropped, while a text cell is always kept, even under an empty label.
/// Cells beyond the last label are ignored. A label repeated in the header
/// keeps the value of its last column.
#[must_use]
pub fn build_document(labels: &[&str], cells: &[&str]) -> Document {
    let mut document = Document::new();
    for (label, cell) in labels.iter().zip(cells) {
        match parse_number(cell) {
            Some(n) if !label.is_empty() => document.set(*label, FieldValue::Number(n)),
            Some(_) => tracing::trace!(cell, "Dropped numeric cell under empty label"),
            None => document.set(*label, FieldValue::Text((*cell).to_string())),
        }
    }
    document
}

/// Service for importing CSV files into a blackboard.
pub struct ImportService {
    store: Arc<dyn Blackboard>,
}

impl ImportService {
    /// Creates a new import service.
    #[must_use]
    pub fn new(store: Arc<dyn Blackboard>) -> Self {
        Self { store }
    }

    /// Imports a CSV file.
    ///
    /// A missing file is not an error: nothing is read and `(0, 0)` is
    /// reported.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, or if any
    /// blackboard operation fails.
    #[instrument(skip(self, options), fields(path = %path.display()))]
    pub fn import_from_file(&self, path: &Path, options: &ImportOptions) -> Result<RunReport> {
        let file = match std::fs::File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("CSV file not found, nothing to import");
                return Ok(RunReport::default());
            },
            Err(e) => return Err(Error::io(path, e)),
        };

        self.import_lines(BufReader::new(file), path, options)
    }

    /// Imports CSV text from a reader.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or any blackboard operation fails.
    pub fn import_from_reader<R: BufRead>(
        &self,
        reader: R,
        options: &ImportOptions,
    ) -> Result<RunReport> {
        self.import_lines(reader, Path::new("<reader>"), options)
    }

    fn import_lines<R: BufRead>(
        &self,
        reader: R,
        origin: &Path,
        options: &ImportOptions,
    ) -> Result<RunReport> {
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => line.map_err(|e| Error::io(origin, e))?,
            None => {
                tracing::debug!("CSV input is empty");
                return Ok(RunReport::default());
            },
        };
        let labels = split_line(&header);

        let tags = TagResolver::new(self.store.as_ref()).resolve(&options.tags)?;

        let mut report = RunReport::default();
        while options.row_limit.allows(report.items_read) {
            let Some(line) = lines.next() else {
                break;
            };
            let line = line.map_err(|e| Error::io(origin, e))?;
            report.items_read += 1;

            let cells = split_line(&line);
            if cells.len() > labels.len() {
                tracing::warn!(
                    row = report.items_read,
                    cells = cells.len(),
                    labels = labels.len(),
                    "Row has more cells than header labels, extra cells dropped"
                );
            }

            let document = build_document(&labels, &cells).with_tags(tags.clone());
            self.store.insert_document(document)?;
            report.items_written += 1;
        }

        tracing::info!(
            rows_read = report.items_read,
            rows_written = report.items_written,
            "CSV import complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryBlackboard;
    use std::io::Cursor;

    fn import(input: &str, options: &ImportOptions) -> (RunReport, Vec<Document>) {
        let store = Arc::new(InMemoryBlackboard::new());
        let service = ImportService::new(store.clone());
        let report = service
            .import_from_reader(Cursor::new(input), options)
            .unwrap();
        let docs = store
            .iterate_documents()
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap();
        (report, docs)
    }

    #[test]
    fn test_numeric_and_text_inference() {
        let (report, docs) = import("a,b\n1,x\n,y\n", &ImportOptions::default());

        assert_eq!(report, RunReport::new(2, 2));
        assert_eq!(docs[0].get("a"), Some(&FieldValue::Number(1.0)));
        assert_eq!(docs[0].get("b"), Some(&FieldValue::from("x")));
        // An empty cell fails numeric parsing and becomes empty text.
        assert_eq!(docs[1].get("a"), Some(&FieldValue::from("")));
        assert_eq!(docs[1].get("b"), Some(&FieldValue::from("y")));
    }

    #[test]
    fn test_empty_label_asymmetry() {
        let doc = build_document(&["", "n"], &["42", "1"]);
        assert_eq!(doc.len(), 1);
        assert!(doc.get("").is_none());

        let doc = build_document(&["", "n"], &["word", "1"]);
        assert_eq!(doc.get(""), Some(&FieldValue::from("word")));
        assert_eq!(doc.get("n"), Some(&FieldValue::Number(1.0)));
    }

    #[test]
    fn test_non_finite_cells_are_numeric() {
        let doc = build_document(&["big", "inf", "nan", ""], &["1e400", "-inf", "NaN", "inf"]);

        assert_eq!(doc.len(), 3);
        assert_eq!(doc.get("big"), Some(&FieldValue::Number(f64::INFINITY)));
        assert_eq!(doc.get("inf"), Some(&FieldValue::Number(f64::NEG_INFINITY)));
        assert!(doc.get("nan").and_then(FieldValue::as_number).is_some_and(f64::is_nan));
        assert!(doc.get("").is_none());
    }

    #[test]
    fn test_padded_cells_stay_text() {
        let doc = build_document(&["a", "b"], &["1", " 2"]);
        assert_eq!(doc.get("a"), Some(&FieldValue::Number(1.0)));
        assert_eq!(doc.get("b"), Some(&FieldValue::from(" 2")));
    }

    #[test]
    fn test_short_and_wide_rows() {
        let doc = build_document(&["a", "b", "c"], &["1"]);
        assert_eq!(doc.len(), 1);

        let doc = build_document(&["a"], &["1", "extra", "2"]);
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get("a"), Some(&FieldValue::Number(1.0)));
    }

    #[test]
    fn test_repeated_header_label_keeps_last_value() {
        let doc = build_document(&["a", "a"], &["1", "two"]);
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get("a"), Some(&FieldValue::from("two")));
    }

    #[test]
    fn test_row_limit() {
        let input = "v\n1\n2\n3\n";
        let options = ImportOptions::default().with_row_limit(RowLimit::new(2));
        let (report, docs) = import(input, &options);
        assert_eq!(report, RunReport::new(2, 2));
        assert_eq!(docs.len(), 2);

        let (report, _) = import(input, &ImportOptions::default().with_row_limit(RowLimit::from_raw(-1)));
        assert_eq!(report, RunReport::new(3, 3));
    }

    #[test]
    fn test_tags_attached_to_every_document() {
        let store = Arc::new(InMemoryBlackboard::new());
        let service = ImportService::new(store.clone());
        let options = ImportOptions::default().with_tags(["t1", "t2"]);

        service
            .import_from_reader(Cursor::new("a\n1\n2\n"), &options)
            .unwrap();

        let docs = store
            .iterate_documents()
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap();
        let t1 = store.lookup_tag_id("t1").unwrap().unwrap();
        let t2 = store.lookup_tag_id("t2").unwrap().unwrap();
        for doc in &docs {
            assert_eq!(doc.tags(), &[t1, t2]);
        }
    }

    #[test]
    fn test_empty_input_and_header_only() {
        let (report, docs) = import("", &ImportOptions::default());
        assert_eq!(report, RunReport::default());
        assert!(docs.is_empty());

        let (report, docs) = import("a,b\n", &ImportOptions::default());
        assert_eq!(report, RunReport::default());
        assert!(docs.is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let (_, docs) = import("a,b\r\n1,x\r\n", &ImportOptions::default());
        assert_eq!(docs[0].get("b"), Some(&FieldValue::from("x")));
    }

    #[test]
    fn test_missing_file_is_a_no_op() {
        let store = Arc::new(InMemoryBlackboard::new());
        let service = ImportService::new(store.clone());

        let report = service
            .import_from_file(
                Path::new("/nonexistent/csvboard/rows.csv"),
                &ImportOptions::default().with_tags(["unused"]),
            )
            .unwrap();

        assert_eq!(report, RunReport::new(0, 0));
        assert_eq!(store.lookup_tag_id("unused").unwrap(), None);
    }
}

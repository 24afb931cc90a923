//! Line-oriented text rendering and the console and file sinks.
//!
//! Every document renders as zero or more `name:value` lines followed by a
//! single blank line.

use crate::io::traits::TextSink;
use crate::models::FieldValue;
use crate::{Error, Result};
use std::io::{Stdout, Write};
use std::path::{Path, PathBuf};

/// Separator between a field name and its value.
pub const NAME_VALUE_SEPARATOR: char = ':';

/// Cuts `text` to at most `max_chars` characters; `0` disables truncation.
///
/// No ellipsis is appended and word boundaries are ignored.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    if max_chars == 0 {
        return text;
    }
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Stringifies a value and applies truncation.
#[must_use]
pub fn render_value(value: &FieldValue, truncate_at: usize) -> String {
    let text = value.to_string();
    truncate_chars(&text, truncate_at).to_string()
}

/// Formats one `name:value` line.
#[must_use]
pub fn format_line(name: &str, rendered_value: &str) -> String {
    format!("{name}{NAME_VALUE_SEPARATOR}{rendered_value}")
}

/// Replaces every line break (`\r\n`, `\n` or `\r`) with a single space.
#[must_use]
pub fn collapse_newlines(line: &str) -> String {
    line.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

/// Console sink writing each line as it is produced.
///
/// With `collapse_newlines` set, embedded line breaks are turned into spaces
/// so every field occupies one on-screen line.
pub struct ConsoleSink<W: Write> {
    writer: W,
    collapse_newlines: bool,
}

impl<W: Write> ConsoleSink<W> {
    /// Creates a console sink over any writer.
    pub const fn new(writer: W, collapse_newlines: bool) -> Self {
        Self {
            writer,
            collapse_newlines,
        }
    }

    /// Consumes the sink, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl ConsoleSink<Stdout> {
    /// Creates a console sink on standard output.
    #[must_use]
    pub fn stdout(collapse_newlines: bool) -> Self {
        Self::new(std::io::stdout(), collapse_newlines)
    }
}

impl<W: Write> TextSink for ConsoleSink<W> {
    fn write_line(&mut self, line: &str) -> Result<()> {
        let result = if self.collapse_newlines {
            writeln!(self.writer, "{}", collapse_newlines(line))
        } else {
            writeln!(self.writer, "{line}")
        };
        result.map_err(|e| Error::io("<console>", e))
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| Error::io("<console>", e))
    }
}

/// File sink accumulating the whole export in memory.
///
/// The destination is written once on [`TextSink::finalize`], replacing any
/// previous content, so repeated exports never grow the file.
pub struct FileSink {
    path: PathBuf,
    buffer: String,
}

impl FileSink {
    /// Creates a file sink for the given destination.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            buffer: String::new(),
        }
    }

    /// Returns the destination path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the text accumulated so far.
    #[must_use]
    pub fn buffered(&self) -> &str {
        &self.buffer
    }
}

impl TextSink for FileSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.buffer.push_str(line);
        self.buffer.push('\n');
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        std::fs::write(&self.path, self.buffer.as_bytes()).map_err(|e| Error::io(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("hello", 0, "hello"; "disabled")]
    #[test_case("hello", 5, "hello"; "at limit")]
    #[test_case("hello", 10, "hello"; "under limit")]
    #[test_case("hello", 3, "hel"; "over limit")]
    #[test_case("héllo wörld", 4, "héll"; "multibyte characters")]
    fn test_truncate_chars(text: &str, max: usize, expected: &str) {
        assert_eq!(truncate_chars(text, max), expected);
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&FieldValue::Number(3.5), 0), "3.5");
        assert_eq!(render_value(&FieldValue::Number(123.456), 3), "123");
        assert_eq!(render_value(&FieldValue::from("hello"), 2), "he");
    }

    #[test]
    fn test_collapse_newlines() {
        assert_eq!(collapse_newlines("a\nb\r\nc\rd"), "a b c d");
        assert_eq!(collapse_newlines("plain"), "plain");
    }

    #[test]
    fn test_console_sink_collapses_only_when_asked() {
        let mut collapsing = ConsoleSink::new(Vec::new(), true);
        collapsing.write_line("note:line1\nline2").unwrap();
        collapsing.finalize().unwrap();
        assert_eq!(collapsing.into_inner(), b"note:line1 line2\n");

        let mut raw = ConsoleSink::new(Vec::new(), false);
        raw.write_line("note:line1\nline2").unwrap();
        assert_eq!(raw.into_inner(), b"note:line1\nline2\n");
    }

    #[test]
    fn test_file_sink_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "stale content that is longer\n").unwrap();

        let mut sink = FileSink::new(&path);
        sink.write_line("x:1").unwrap();
        sink.write_line("").unwrap();
        assert_eq!(sink.buffered(), "x:1\n\n");
        sink.finalize().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "x:1\n\n");
    }
}

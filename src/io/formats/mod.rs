//! Format adapters for import/export.
//!
//! | Module | Direction | Notes |
//! |--------|-----------|-------|
//! | [`csv`] | Import | Header + rows, split on `,` without quoting |
//! | [`text`] | Export | `name:value` lines, blank line between documents |

pub mod csv;
pub mod text;

pub use csv::{infer_value, parse_number, split_line};
pub use text::{ConsoleSink, FileSink, collapse_newlines, format_line, render_value, truncate_chars};

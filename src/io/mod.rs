//! Import/Export I/O subsystem.
//!
//! # Architecture
//!
//! - **Format adapters** ([`formats`]) split CSV lines, type cells and render
//!   `name:value` text through the [`TextSink`] trait
//! - **Projection** ([`projection`]) selects the fields to export
//! - **Services** ([`services`]) orchestrate the blackboard and the adapters
//!
//! # Examples
//!
//! ## Import a CSV file
//!
//! ```rust,ignore
//! use csvboard::io::{ImportOptions, ImportService};
//!
//! let service = ImportService::new(store.clone());
//! let report = service.import_from_file(
//!     "rows.csv".as_ref(),
//!     &ImportOptions::default().with_tags(["sensor", "2024"]),
//! )?;
//! ```
//!
//! ## Export to the console and a file
//!
//! ```rust,ignore
//! use csvboard::io::{ExportOptions, ExportService};
//!
//! let report = ExportService::new(store).export(
//!     &ExportOptions::default()
//!         .with_fields(["name", "value"])
//!         .with_truncate_at(100)
//!         .with_console(true)
//!         .with_file("out.txt"),
//! )?;
//! ```

pub mod formats;
pub mod projection;
pub mod services;
pub mod traits;

// Re-exports for convenience
pub use formats::{ConsoleSink, FileSink, split_line};
pub use projection::project;
pub use services::export::{ExportOptions, ExportService};
pub use services::import::{ImportOptions, ImportService, build_document};
pub use services::tags::{TagResolver, parse_tag_list};
pub use traits::TextSink;

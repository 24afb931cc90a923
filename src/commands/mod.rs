//! Command handlers module.
//!
//! - `io.rs`: `import` and `export`
//! - `config.rs`: effective configuration display

mod config;
mod io;

pub use config::cmd_config;
pub use io::{cmd_export, cmd_import};

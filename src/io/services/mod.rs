//! Import and export services.

pub mod export;
pub mod import;
pub mod tags;

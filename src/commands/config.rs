//! Config command handler.

use csvboard::RunConfig;
use std::path::Path;

/// Prints the effective configuration after file, environment and flag
/// overrides have been applied.
pub fn cmd_config(config: &RunConfig) {
    println!("Current Configuration");
    println!("=====================");
    println!();
    println!("Data Directory: {}", config.data_dir.display());
    println!(
        "Row Limit: {}",
        config
            .row_limit
            .max()
            .map_or_else(|| "unbounded".to_string(), |m| m.to_string())
    );
    println!();

    println!("Import:");
    println!("  CSV File: {}", display_path(config.import.csv_filename.as_deref()));
    println!("  Blackboard: {}", config.import.output_blackboard);
    println!("  Tags: {}", display_list(&config.import.output_tags, "(none)"));
    println!();

    println!("Export:");
    println!("  Blackboard: {}", config.export.input_blackboard);
    println!("  Fields: {}", display_list(&config.export.input_fields, "(all)"));
    println!("  Tags (not applied): {}", display_list(&config.export.input_tags, "(none)"));
    println!("  Text File: {}", display_path(config.export.txt_filename.as_deref()));
    println!("  On Screen: {}", config.export.on_screen);
    if config.export.truncate_at > 0 {
        println!("  Truncate At: {}", config.export.truncate_at);
    } else {
        println!("  Truncate At: (disabled)");
    }
    println!();

    println!("Logging:");
    println!(
        "  Format: {}",
        config.logging.format.as_deref().unwrap_or("pretty")
    );
    println!("  File: {}", config.logging.file.as_deref().unwrap_or("(stderr)"));
    println!(
        "  Filter: {}",
        config.logging.filter.as_deref().unwrap_or("(default)")
    );
}

fn display_path(path: Option<&Path>) -> String {
    path.map_or_else(|| "(none)".to_string(), |p| p.display().to_string())
}

fn display_list(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else {
        items.join(", ")
    }
}

//! Resolve command implementation

use std::path::Path;

use colored::Colorize;
use serde::Serialize;

use super::load_and_resolve;
use crate::error::Result;

#[derive(Debug, Serialize)]
struct OrderedEntry<'a> {
    position: usize,
    plugin_id: &'a str,
    descriptor_id: &'a str,
    version: String,
}

/// Run the resolve command
pub fn run_resolve(file: &Path, json: bool) -> Result<()> {
    let resolution = load_and_resolve(file)?;
    let entries: Vec<OrderedEntry<'_>> = resolution
        .ordered()
        .into_iter()
        .enumerate()
        .map(|(position, descriptor)| OrderedEntry {
            position,
            plugin_id: descriptor.plugin_id(),
            descriptor_id: descriptor.descriptor_id(),
            version: descriptor.version().to_string(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let interface = resolution.interface();
    println!(
        "{} {} ({})",
        "Interface".bold(),
        interface.name.cyan(),
        interface.sort_context
    );
    if entries.is_empty() {
        println!("  {}", "No active descriptors".dimmed());
    }
    for entry in &entries {
        println!(
            "  {:>3}. {} {} {}",
            entry.position + 1,
            entry.descriptor_id.green(),
            entry.version,
            format!("[{}]", entry.plugin_id).dimmed()
        );
    }
    Ok(())
}

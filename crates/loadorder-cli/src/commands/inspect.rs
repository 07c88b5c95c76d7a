//! Inspect command implementation

use std::path::Path;

use colored::Colorize;
use loadorder_core::{DescriptorStatus, ReportSummary, ResolutionReport};
use serde::Serialize;

use super::load_and_resolve;
use crate::error::Result;

#[derive(Debug, Serialize)]
struct InspectOutput<'a> {
    #[serde(flatten)]
    report: &'a ResolutionReport,
    summary: ReportSummary,
}

/// Run the inspect command
pub fn run_inspect(file: &Path, json: bool) -> Result<()> {
    let report = load_and_resolve(file)?.report();
    let summary = report.summary();

    if json {
        let output = InspectOutput {
            report: &report,
            summary,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} {} ({}{})",
        "Interface".bold(),
        report.interface.cyan(),
        report.sort_context,
        if report.system_only { ", system only" } else { "" }
    );
    println!();

    for entry in &report.entries {
        let state = match &entry.status {
            DescriptorStatus::Active { sort_index } => format!("#{sort_index}").green(),
            DescriptorStatus::DependencyDisabled { reason, .. } => reason.yellow(),
            DescriptorStatus::ConflictDisabled { reason, .. } => reason.red(),
            DescriptorStatus::Duplicate { reason, .. } => reason.dimmed(),
        };
        let marker = if entry.status.is_active() {
            "+".green()
        } else {
            "-".red()
        };
        println!(
            "  {} {}/{} {}: {}",
            marker, entry.plugin_id, entry.descriptor_id, entry.version, state
        );
    }

    println!();
    println!(
        "{}: {} active, {} dependency-disabled, {} conflict-disabled, {} duplicate",
        "Summary".bold(),
        summary.active,
        summary.dependency_disabled,
        summary.conflict_disabled,
        summary.duplicates
    );
    Ok(())
}

//! Check command implementation

use std::path::Path;

use colored::Colorize;

use super::load_and_resolve;
use crate::error::{CliError, Result};

/// Run the check command
///
/// With `strict`, any excluded descriptor is reported as an error.
pub fn run_check(file: &Path, strict: bool) -> Result<()> {
    let summary = load_and_resolve(file)?.report().summary();

    if strict && summary.excluded() > 0 {
        return Err(CliError::user(format!(
            "{} of {} descriptors excluded (run `loadorder inspect` for details)",
            summary.excluded(),
            summary.total()
        )));
    }

    println!(
        "{} {} active, {} excluded",
        "OK".green().bold(),
        summary.active,
        summary.excluded()
    );
    Ok(())
}

//! Validation command handler

use anyhow::{bail, Result};
use std::path::Path;

use super::load_weapon;

/// Handle `check` command
///
/// Prints every finding and fails when any of them is an error.
pub fn handle(input: &Path, quiet: bool) -> Result<()> {
    let weapon = load_weapon(input)?;
    let report = balcora::validate(&weapon);

    for finding in &report.findings {
        if quiet && finding.severity != balcora::Severity::Error {
            continue;
        }
        println!("{}", finding);
    }

    let errors = report.errors().count();
    let warnings = report.warnings().count();

    if errors > 0 {
        bail!(
            "{}: {} error(s), {} warning(s)",
            input.display(),
            errors,
            warnings
        );
    }

    if !quiet {
        println!("{}: ok ({} warning(s))", input.display(), warnings);
    }

    Ok(())
}

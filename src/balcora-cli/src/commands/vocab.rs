//! Vocabulary listing command handler

use anyhow::{Context, Result};

/// Handle `vocab` command
///
/// Without a name, lists every vocabulary and its size; with one, prints its
/// members in canonical order.
pub fn handle(name: Option<&str>) -> Result<()> {
    match name {
        Some(name) => {
            let listing = balcora::vocabulary_by_name(name).with_context(|| {
                format!(
                    "Unknown vocabulary '{}'. Run 'balcora vocab' to list them.",
                    name
                )
            })?;
            for member in listing.members {
                println!("{}", member);
            }
        }
        None => {
            for listing in balcora::vocabularies() {
                println!("{:<24} {:>3} entries", listing.name, listing.members.len());
            }
        }
    }

    Ok(())
}

//! Command handlers for balcora CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod check;
pub mod configure;
pub mod emit;
pub mod vocab;

use anyhow::{Context, Result};
use balcora::{InputFormat, WeaponExt};
use std::fs;
use std::path::Path;

/// Read and parse a weapon configuration, picking the format by extension
pub fn load_weapon(input: &Path) -> Result<WeaponExt> {
    let format = InputFormat::from_path(input)?;
    let contents = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    tracing::debug!(path = %input.display(), ?format, "loading weapon");

    WeaponExt::parse(&contents, format)
        .with_context(|| format!("Failed to parse {}", input.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_weapon_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("ion.json");
        fs::write(&json, r#"{"weapon_type": "fixed"}"#).unwrap();
        assert!(load_weapon(&json).unwrap().weapon.weapon_type.is_some());

        let yaml = dir.path().join("ion.yaml");
        fs::write(&yaml, "weapon_type: gimble\n").unwrap();
        assert!(load_weapon(&yaml).unwrap().weapon.weapon_type.is_some());

        let other = dir.path().join("ion.txt");
        fs::write(&other, "").unwrap();
        assert!(load_weapon(&other).is_err());
    }
}

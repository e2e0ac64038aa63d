//! Export command handler

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

use super::load_weapon;
use crate::config::Config;

/// Options for `emit`, as given on the command line
#[derive(Debug, Default)]
pub struct EmitOptions {
    pub output: Option<PathBuf>,
    pub stem: Option<String>,
    pub stdout: bool,
    pub backup: Option<bool>,
    pub force: bool,
}

/// Pick the file stem: explicit flag, weapon name, configured default
fn resolve_stem(options: &EmitOptions, weapon: &balcora::WeaponExt, config: &Config) -> Option<String> {
    options
        .stem
        .clone()
        .or_else(|| weapon.weapon.name.clone())
        .or_else(|| config.default_stem.clone())
}

/// Handle `emit` command
pub fn handle(input: &Path, options: EmitOptions, config: &Config) -> Result<()> {
    let weapon = load_weapon(input)?;

    let report = balcora::validate(&weapon);
    for finding in &report.findings {
        eprintln!("{}", finding);
    }
    if !report.is_exportable() && !options.force {
        bail!(
            "{} has {} validation error(s); fix them or pass --force",
            input.display(),
            report.errors().count()
        );
    }

    let script = balcora::weapon_to_lua(&weapon)
        .with_context(|| format!("Failed to export {}", input.display()))?;

    if options.stdout {
        println!("{}", script);
        return Ok(());
    }

    let stem = resolve_stem(&options, &weapon, config);
    let export = balcora::Export::lua(script, stem.as_deref());
    let dir = options.output.clone().unwrap_or_else(|| config.output_dir());
    let backup = options.backup.unwrap_or_else(|| config.backup());

    let outcome = balcora::write_export(&export, &dir, backup)
        .with_context(|| format!("Failed to write {}", dir.join(export.file_name()).display()))?;

    if let Some(backup_path) = &outcome.backup {
        eprintln!("Backed up previous script to {}", backup_path.display());
    }
    println!("Wrote {}", outcome.path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const WEAPON: &str = r#"
name: hgn_pulsar
weapon_type: gimble
weapon_result:
  condition: hit
  effect: damagehealth
  target: target
  effect_min: 40
  effect_max: 60
accuracy:
  default: 0.5
penetration:
  default: 1
  field_pen: 0
fire_angles:
  cone_radius: 5
  rotate_x_min: 0
  rotate_x_max: 0
  rotate_y_min: 0
  rotate_y_max: 0
"#;

    #[test]
    fn test_emit_writes_named_script() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("pulsar.yaml");
        fs::write(&input, WEAPON).unwrap();

        let options = EmitOptions {
            output: Some(dir.path().join("out")),
            backup: Some(false),
            ..EmitOptions::default()
        };
        handle(&input, options, &Config::default()).unwrap();

        let script = fs::read_to_string(dir.path().join("out").join("hgn_pulsar.lua")).unwrap();
        assert!(script.starts_with("-- Generated with"));
        assert!(script.contains("setAccuracy(NewWeaponType, 0.5);"));
    }

    #[test]
    fn test_emit_refuses_invalid_input_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.json");
        fs::write(&input, "{}").unwrap();

        let options = EmitOptions {
            output: Some(dir.path().to_path_buf()),
            ..EmitOptions::default()
        };
        let err = handle(&input, options, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("validation error"));

        // --force gets past validation but the emitter still needs the sections
        let options = EmitOptions {
            output: Some(dir.path().to_path_buf()),
            force: true,
            ..EmitOptions::default()
        };
        assert!(handle(&input, options, &Config::default()).is_err());
    }

    #[test]
    fn test_resolve_stem_precedence() {
        let weapon = balcora::WeaponExt::from_yaml(WEAPON).unwrap();
        let config = Config {
            default_stem: Some("fallback".into()),
            ..Config::default()
        };

        let explicit = EmitOptions {
            stem: Some("explicit".into()),
            ..EmitOptions::default()
        };
        assert_eq!(resolve_stem(&explicit, &weapon, &config).as_deref(), Some("explicit"));
        assert_eq!(
            resolve_stem(&EmitOptions::default(), &weapon, &config).as_deref(),
            Some("hgn_pulsar")
        );
        assert_eq!(
            resolve_stem(&EmitOptions::default(), &balcora::WeaponExt::default(), &config)
                .as_deref(),
            Some("fallback")
        );
    }
}

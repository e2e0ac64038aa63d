//! Configuration command handler

use anyhow::Result;
use std::path::PathBuf;

use crate::config::Config;

/// Handle the configure command
///
/// # Arguments
/// * `output_dir` - Optional default output directory
/// * `stem` - Optional default file stem
/// * `backup` - Optional backup default
/// * `show` - If true, show current configuration
pub fn handle(
    output_dir: Option<PathBuf>,
    stem: Option<String>,
    backup: Option<bool>,
    show: bool,
) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if !apply(&mut config, output_dir, stem, backup) {
        show_usage();
        return Ok(());
    }

    config.save()?;
    println!("Configuration updated");
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

/// Apply the given settings; returns false when nothing was given
fn apply(
    config: &mut Config,
    output_dir: Option<PathBuf>,
    stem: Option<String>,
    backup: Option<bool>,
) -> bool {
    let changed = output_dir.is_some() || stem.is_some() || backup.is_some();

    if let Some(dir) = output_dir {
        config.output_dir = Some(dir);
    }
    if let Some(stem) = stem {
        config.default_stem = Some(stem);
    }
    if let Some(backup) = backup {
        config.backup = Some(backup);
    }

    changed
}

/// Display current configuration
fn show_config(config: &Config) {
    match &config.output_dir {
        Some(dir) => println!("Output directory: {}", dir.display()),
        None => println!("Output directory: (current directory)"),
    }
    println!(
        "Default stem: {}",
        config
            .default_stem
            .as_deref()
            .unwrap_or(balcora::export::DEFAULT_STEM)
    );
    println!("Backup: {}", config.backup());

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: balcora configure --output-dir DIR [--stem NAME] [--backup true|false]");
    println!("   or: balcora configure --show");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_usage_does_not_panic() {
        show_usage();
    }

    #[test]
    fn test_apply_nothing() {
        let mut config = Config::default();
        assert!(!apply(&mut config, None, None, None));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_apply_keeps_unset_fields() {
        let mut config = Config {
            output_dir: Some(PathBuf::from("weapons")),
            default_stem: None,
            backup: Some(true),
        };
        assert!(apply(&mut config, None, Some("kus_weapon".into()), Some(false)));
        assert_eq!(config.output_dir, Some(PathBuf::from("weapons")));
        assert_eq!(config.default_stem.as_deref(), Some("kus_weapon"));
        assert_eq!(config.backup, Some(false));
    }
}

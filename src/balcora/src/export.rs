//! Script export
//!
//! The browser shell saves a script with `(contents, filename, extension)`;
//! [`Export`] is that contract. [`write_export`] is the native counterpart:
//! it writes the file and, when asked, keeps a backup of a script that was
//! edited by hand since the last export instead of silently replacing it.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Stem used when the weapon has no name
pub const DEFAULT_STEM: &str = "balcora";

/// Extension of weapon scripts
pub const LUA_EXTENSION: &str = "lua";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid file stem: {0:?}")]
    InvalidStem(String),
}

/// A file ready to be saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub contents: String,
    pub stem: String,
    pub extension: String,
}

impl Export {
    /// A Lua script export; an empty stem falls back to [`DEFAULT_STEM`]
    pub fn lua(contents: impl Into<String>, stem: Option<&str>) -> Self {
        let stem = stem
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_STEM);
        Export {
            contents: contents.into(),
            stem: stem.to_string(),
            extension: LUA_EXTENSION.to_string(),
        }
    }

    /// `stem.extension`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.stem, self.extension)
    }

    /// MIME type the browser download is tagged with
    pub fn mime_type(&self) -> String {
        format!("application/{}", self.extension)
    }

    fn check_stem(&self) -> Result<(), ExportError> {
        let bad = self.stem.is_empty()
            || self.stem == "."
            || self.stem == ".."
            || self.stem.contains(['/', '\\']);
        if bad {
            return Err(ExportError::InvalidStem(self.stem.clone()));
        }
        Ok(())
    }
}

/// Metadata tracking script hashes for backup decisions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Hash of the script when the backup was taken
    pub backup_hash: String,

    /// Hash of the script written by the last export
    pub last_export_hash: String,
}

impl ExportMetadata {
    pub fn new(hash: String) -> Self {
        ExportMetadata {
            backup_hash: hash.clone(),
            last_export_hash: hash,
        }
    }
}

/// SHA-256 of some bytes, hex encoded
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// SHA-256 of a file, hex encoded
pub fn hash_file(path: &Path) -> Result<String, ExportError> {
    Ok(hash_bytes(&fs::read(path)?))
}

/// Backup and metadata paths for a script
pub fn backup_paths(script: &Path) -> (PathBuf, PathBuf) {
    let mut backup = script.as_os_str().to_owned();
    backup.push(".bak");
    let mut metadata = backup.clone();
    metadata.push(".json");
    (PathBuf::from(backup), PathBuf::from(metadata))
}

pub fn read_metadata(metadata_path: &Path) -> Result<Option<ExportMetadata>, ExportError> {
    if !metadata_path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(metadata_path)?;
    Ok(Some(serde_json::from_str(&data)?))
}

pub fn write_metadata(metadata_path: &Path, metadata: &ExportMetadata) -> Result<(), ExportError> {
    fs::write(metadata_path, serde_json::to_string_pretty(metadata)?)?;
    Ok(())
}

/// Whether the existing script should be backed up before it is replaced
///
/// Yes when it exists and was not produced by the last export (edited by
/// hand, or never exported by us). No when it matches a tracked hash.
pub fn should_backup(script: &Path, metadata_path: &Path) -> Result<bool, ExportError> {
    if !script.exists() {
        return Ok(false);
    }

    let current = hash_file(script)?;
    match read_metadata(metadata_path)? {
        Some(meta) => Ok(current != meta.last_export_hash && current != meta.backup_hash),
        None => Ok(true),
    }
}

/// Where an export landed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub path: PathBuf,
    /// Backup written by this export, if any
    pub backup: Option<PathBuf>,
    pub hash: String,
}

/// Write an export into `dir`
///
/// With `backup` set, an existing script that differs from what the last
/// export wrote is copied to `<file>.bak` first, and the metadata records
/// the new script's hash.
pub fn write_export(export: &Export, dir: &Path, backup: bool) -> Result<ExportOutcome, ExportError> {
    export.check_stem()?;
    fs::create_dir_all(dir)?;

    let path = dir.join(export.file_name());
    let (backup_path, metadata_path) = backup_paths(&path);

    let mut written_backup = None;
    let mut metadata = if backup {
        read_metadata(&metadata_path)?
    } else {
        None
    };

    if backup && should_backup(&path, &metadata_path)? {
        fs::copy(&path, &backup_path)?;
        let hash = hash_file(&backup_path)?;
        tracing::info!(backup = %backup_path.display(), "backed up modified script");
        metadata = Some(ExportMetadata::new(hash));
        written_backup = Some(backup_path);
    }

    fs::write(&path, &export.contents)?;
    let hash = hash_bytes(export.contents.as_bytes());

    if backup {
        let mut meta = metadata.unwrap_or_else(|| ExportMetadata::new(hash.clone()));
        meta.last_export_hash = hash.clone();
        write_metadata(&metadata_path, &meta)?;
    }

    tracing::debug!(path = %path.display(), bytes = export.contents.len(), "wrote export");

    Ok(ExportOutcome {
        path,
        backup: written_backup,
        hash,
    })
}

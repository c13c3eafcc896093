//! Output file naming
//!
//! Every copy lands directly in the output directory as
//! `"{prefix} {original file name}"`.

use crate::error::{Error, Result};
use crate::time::CaptureTime;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Highest numeric suffix tried before giving up on a free name
const MAX_CONFLICT_SUFFIX: u32 = 9999;

/// What to do when the generated destination already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Replace the existing file (last write wins)
    #[default]
    Overwrite,
    /// Keep the existing file and add a numeric suffix: `name_1.jpg`
    Suffix,
}

/// Build `output_dir/"{prefix} {file_name}"`
pub fn destination_path(output_dir: &Path, time: &CaptureTime, file_name: &OsStr) -> PathBuf {
    let mut name = time.prefix();
    name.push(' ');
    name.push_str(&file_name.to_string_lossy());
    output_dir.join(name)
}

/// Apply `policy` to a computed destination
pub fn apply_conflict_policy(path: PathBuf, policy: ConflictPolicy) -> Result<PathBuf> {
    match policy {
        ConflictPolicy::Overwrite => Ok(path),
        ConflictPolicy::Suffix => resolve_filename_conflict(path),
    }
}

/// Resolve filename conflicts by adding a numeric suffix
pub fn resolve_filename_conflict(path: PathBuf) -> Result<PathBuf> {
    if !path.exists() {
        return Ok(path);
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| Error::InvalidFileName { path: path.clone() })?;

    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let parent = path.parent().map(Path::to_path_buf).unwrap_or_default();

    for i in 1..=MAX_CONFLICT_SUFFIX {
        let candidate = parent.join(format!("{}_{}{}", stem, i, extension));
        if !candidate.exists() {
            return Ok(candidate);
        }
    }

    Err(Error::FilenameConflict { path })
}

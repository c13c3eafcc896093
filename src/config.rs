//! Configuration types for the datetime prefixer

use crate::error::Result;
use crate::naming::ConflictPolicy;
use crate::process::ensure_output_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Input folder token that stands for the current working directory
pub const THIS_FOLDER: &str = "this-folder";

/// Configuration for one batch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory whose direct entries are copied (or `this-folder`)
    pub input_folder: PathBuf,

    /// Destination directory; the current directory when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_folder: Option<PathBuf>,

    /// Behavior when a generated name already exists
    #[serde(default)]
    pub on_conflict: ConflictPolicy,

    /// Report what would be copied without writing anything
    #[serde(default)]
    pub dry_run: bool,

    /// Verbose output
    #[serde(default)]
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_folder: PathBuf::from(THIS_FOLDER),
            output_folder: None,
            on_conflict: ConflictPolicy::default(),
            dry_run: false,
            verbose: false,
        }
    }
}

impl Config {
    /// Absolute input directory, with `this-folder` mapped to the working directory
    pub fn resolve_input_dir(&self) -> Result<PathBuf> {
        if self.input_folder == Path::new(THIS_FOLDER) {
            Ok(std::env::current_dir()?)
        } else {
            Ok(std::path::absolute(&self.input_folder)?)
        }
    }

    /// Absolute output directory, created when configured and missing
    pub fn resolve_output_dir(&self) -> Result<PathBuf> {
        match &self.output_folder {
            Some(folder) => ensure_output_dir(folder),
            None => Ok(std::env::current_dir()?),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> std::result::Result<(), ConfigError> {
        let path = path.as_ref();

        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError {
            source: e,
        })?;

        fs::write(path, content).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    /// Generate a sample configuration file content
    pub fn sample_config() -> String {
        r#"# Datetime Prefixer Configuration File
# This file uses TOML format (https://toml.io)

# Folder whose files are copied. Subfolders are not entered.
# "this-folder" means the current working directory.
input_folder = "D:/Camera"

# Destination folder, created if missing (its parent must exist).
# Omit to copy into the current working directory.
output_folder = "D:/Sorted"

# What to do when a generated name already exists: "overwrite" or "suffix"
# - overwrite: replace the existing file (default)
# - suffix: keep it and name the new copy "<name>_1.jpg", "<name>_2.jpg", ...
on_conflict = "overwrite"

# Dry run mode - show what would be done without actually doing it
dry_run = false

# Verbose output - list every file and its destination
verbose = false
"#
        .to_string()
    }
}

/// Errors that can occur when loading or saving configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read configuration file
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse configuration file
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Failed to write configuration file
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to serialize configuration
    SerializeError { source: toml::ser::Error },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError { path, source } => {
                write!(f, "Failed to read config file '{}': {}", path.display(), source)
            }
            ConfigError::ParseError { path, source } => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), source)
            }
            ConfigError::WriteError { path, source } => {
                write!(f, "Failed to write config file '{}': {}", path.display(), source)
            }
            ConfigError::SerializeError { source } => {
                write!(f, "Failed to serialize config: {}", source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ReadError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
            ConfigError::WriteError { source, .. } => Some(source),
            ConfigError::SerializeError { source } => Some(source),
        }
    }
}

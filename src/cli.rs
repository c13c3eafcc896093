//! CLI argument parsing with clap

use crate::config::Config;
use crate::naming::ConflictPolicy;
use clap::Parser;
use std::path::PathBuf;

/// Datetime Prefixer - sort a photo library by file name
///
/// Copies every image in a folder, prefixing each copy's name with the
/// date and time the photo was taken (EXIF DateTimeOriginal). Files
/// without that tag are prefixed with "none".
#[derive(Parser, Debug)]
#[command(name = "datetime-prefixer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Folder to copy from, or "this-folder" for the current directory
    #[arg(long, required_unless_present_any = ["config", "sample_config"])]
    pub input_folder: Option<PathBuf>,

    /// Folder to copy into (created if missing; default: current directory)
    #[arg(long)]
    pub output_folder: Option<PathBuf>,

    /// Path to configuration file (TOML format)
    ///
    /// Settings from the file are used as defaults; CLI arguments override them.
    #[arg(short = 'C', long, env = "DATETIME_PREFIXER_CONFIG")]
    pub config: Option<PathBuf>,

    /// What to do when a generated name already exists
    #[arg(long, value_enum)]
    pub on_conflict: Option<ConflictPolicy>,

    /// Dry run mode - show what would be done without doing it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Also write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Output file log format as JSON
    #[arg(long, requires = "log_file")]
    pub json_log: bool,

    /// Write the effective configuration to this file and exit
    #[arg(long)]
    pub save_config: Option<PathBuf>,

    /// Print a commented sample configuration file and exit
    #[arg(long, exclusive = true)]
    pub sample_config: bool,
}

impl Cli {
    /// Merge CLI arguments with config from file
    /// CLI arguments take precedence over config file settings
    pub fn merge_with_config(&self, mut config: Config) -> Config {
        if let Some(ref input) = self.input_folder {
            config.input_folder = input.clone();
        }
        if let Some(ref output) = self.output_folder {
            config.output_folder = Some(output.clone());
        }
        if let Some(policy) = self.on_conflict {
            config.on_conflict = policy;
        }
        if self.dry_run {
            config.dry_run = true;
        }
        if self.verbose {
            config.verbose = true;
        }

        config
    }

    /// Convert CLI arguments to Config (when no config file is used)
    pub fn to_config(&self) -> Option<Config> {
        let input_folder = self.input_folder.clone()?;
        Some(Config {
            input_folder,
            output_folder: self.output_folder.clone(),
            on_conflict: self.on_conflict.unwrap_or_default(),
            dry_run: self.dry_run,
            verbose: self.verbose,
        })
    }
}

//! Datetime Prefixer - copy photos under chronologically sortable names
//!
//! This library copies every image in a folder into an output folder,
//! prefixing each copy's name with the EXIF original capture time:
//! - EXIF `DateTimeOriginal` extraction
//! - `YYYY-MM-DD HH-MM-SS` prefixes, `none` when no time is known
//! - Per-file error reporting without aborting the batch
//! - Single-line console progress

// Initialize i18n with locale files
rust_i18n::i18n!("locales", fallback = "en");

pub mod cli;
pub mod config;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod naming;
pub mod process;
pub mod progress;
pub mod time;

pub use cli::Cli;
pub use config::{Config, ConfigError, THIS_FOLDER};
pub use error::{Error, Result};
pub use i18n::init_locale;
pub use naming::ConflictPolicy;
pub use process::{FileResult, ProcessingStats, ProcessingStatus, Processor, ensure_output_dir};
pub use progress::{ConsoleStatus, StatusSink};
pub use time::{CaptureTime, UnknownReason, resolve_capture_time};

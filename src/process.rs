//! Batch copier
//!
//! Handles the core logic of:
//! - Listing the direct entries of the input directory
//! - Resolving each entry's capture time
//! - Copying it into the output directory under a prefixed name
//!
//! Processing is strictly sequential. Per-file failures are reported to the
//! status sink and never abort the batch.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::naming::{ConflictPolicy, apply_conflict_policy, destination_path};
use crate::progress::StatusSink;
use crate::time::{CaptureTime, resolve_capture_time};
use filetime::FileTime;
use rust_i18n::t;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, info, span, warn};
use walkdir::{DirEntry, WalkDir};

/// Result of processing a single entry
#[derive(Debug, Clone)]
pub struct FileResult {
    /// Source file path
    pub source: PathBuf,
    /// Destination file path (if one was computed)
    pub destination: Option<PathBuf>,
    /// Resolved capture time (if the file could be read)
    pub capture_time: Option<CaptureTime>,
    /// Processing status
    pub status: ProcessingStatus,
    /// Error message (if failed)
    pub error: Option<String>,
}

/// Status of entry processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStatus {
    /// Copied to its destination
    Copied,
    /// Could not be opened as an image; not copied
    SourceUnreadable,
    /// Destination write failed
    CopyFailed,
    /// Dry run - would have been copied
    DryRun,
}

/// Processing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    /// Entries found in the input directory
    pub total_files: usize,
    /// Entries handled so far, whatever the outcome
    pub processed: usize,
    pub copied: usize,
    pub unreadable: usize,
    pub copy_failed: usize,
    pub dry_run: usize,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failed(&self) -> usize {
        self.unreadable + self.copy_failed
    }

    pub fn summary(&self) -> String {
        format!(
            "Total: {}, Processed: {}, Copied: {}, Unreadable: {}, Copy failed: {}, Dry run: {}",
            self.total_files,
            self.processed,
            self.copied,
            self.unreadable,
            self.copy_failed,
            self.dry_run
        )
    }
}

/// Create `path` if it does not exist yet and return it as an absolute path
///
/// The parent must already exist. Succeeds whenever a directory is present
/// at `path` afterwards, including when it was already there.
pub fn ensure_output_dir(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|source| Error::OutputDir {
        path: path.to_path_buf(),
        source,
    })?;

    match fs::create_dir(&absolute) {
        Ok(()) => info!(output_dir = %absolute.display(), "Created output directory"),
        Err(_) if absolute.is_dir() => {
            debug!(output_dir = %absolute.display(), "Output directory already exists")
        }
        Err(source) => {
            return Err(Error::OutputDir {
                path: absolute,
                source,
            });
        }
    }

    Ok(absolute)
}

/// Main processor for one batch
pub struct Processor {
    input_dir: PathBuf,
    output_dir: PathBuf,
    on_conflict: ConflictPolicy,
    dry_run: bool,
    stats: ProcessingStats,
}

impl Processor {
    /// Create a processor over already-resolved directories
    pub fn new(input_dir: PathBuf, output_dir: PathBuf, config: &Config) -> Self {
        Self {
            input_dir,
            output_dir,
            on_conflict: config.on_conflict,
            dry_run: config.dry_run,
            stats: ProcessingStats::new(),
        }
    }

    /// Get processing statistics
    pub fn stats(&self) -> &ProcessingStats {
        &self.stats
    }

    /// Run the batch, reporting progress to `sink`
    pub fn run(&mut self, sink: &mut dyn StatusSink) -> Result<Vec<FileResult>> {
        let _span = span!(Level::INFO, "processor_run").entered();

        let entries = self.collect_entries()?;
        let total = entries.len();
        self.stats = ProcessingStats {
            total_files: total,
            ..ProcessingStats::new()
        };
        info!(
            input_dir = %self.input_dir.display(),
            output_dir = %self.output_dir.display(),
            count = total,
            "Processing entries"
        );

        let mut results = Vec::with_capacity(total);
        for entry in entries {
            let result = match entry {
                Ok(entry) => self.process_entry(entry.path(), entry.file_name(), sink),
                Err(e) => {
                    let source = e.path().map(Path::to_path_buf).unwrap_or_default();
                    self.unreadable(source, e.to_string(), sink)
                }
            };
            results.push(result);
        }

        sink.finish();
        info!(summary = %self.stats.summary(), "Batch complete");

        Ok(results)
    }

    /// List the direct entries of the input directory in listing order
    fn collect_entries(&self) -> Result<Vec<walkdir::Result<DirEntry>>> {
        if !self.input_dir.is_dir() {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("{} is not a directory", self.input_dir.display()),
            )));
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(&self.input_dir).min_depth(1).max_depth(1) {
            match entry {
                Err(e) if e.depth() == 0 => return Err(Error::ListDir(e)),
                other => entries.push(other),
            }
        }

        debug!(count = entries.len(), "Listed input directory");
        Ok(entries)
    }

    fn process_entry(
        &mut self,
        source: &Path,
        file_name: &OsStr,
        sink: &mut dyn StatusSink,
    ) -> FileResult {
        let _file_span = span!(Level::DEBUG, "process_file", ?source).entered();

        let capture_time = match resolve_capture_time(source) {
            Ok(time) => time,
            Err(e) => return self.unreadable(source.to_path_buf(), e.to_string(), sink),
        };

        let result = match apply_conflict_policy(
            destination_path(&self.output_dir, &capture_time, file_name),
            self.on_conflict,
        ) {
            Ok(dest) if self.dry_run => {
                debug!(?source, ?dest, "Dry run, not copying");
                self.stats.dry_run += 1;
                FileResult {
                    source: source.to_path_buf(),
                    destination: Some(dest),
                    capture_time: Some(capture_time),
                    status: ProcessingStatus::DryRun,
                    error: None,
                }
            }
            Ok(dest) => match copy_file(source, &dest) {
                Ok(()) => {
                    debug!(?source, ?dest, "Copied");
                    self.stats.copied += 1;
                    FileResult {
                        source: source.to_path_buf(),
                        destination: Some(dest),
                        capture_time: Some(capture_time),
                        status: ProcessingStatus::Copied,
                        error: None,
                    }
                }
                Err(e) => self.copy_failed(source, Some(dest), capture_time, e, file_name, sink),
            },
            Err(e) => self.copy_failed(source, None, capture_time, e, file_name, sink),
        };

        self.stats.processed += 1;
        sink.update(&t!(
            "progress",
            count = self.stats.processed,
            total = self.stats.total_files
        ));

        result
    }

    /// Record an entry that could not be read as an image
    fn unreadable(&mut self, source: PathBuf, error: String, sink: &mut dyn StatusSink) -> FileResult {
        warn!(?source, %error, "Error reading file, skipping");
        sink.emit(&t!("error_reading", path = source.display()));
        self.stats.unreadable += 1;
        self.stats.processed += 1;

        FileResult {
            source,
            destination: None,
            capture_time: None,
            status: ProcessingStatus::SourceUnreadable,
            error: Some(error),
        }
    }

    fn copy_failed(
        &mut self,
        source: &Path,
        destination: Option<PathBuf>,
        capture_time: CaptureTime,
        error: Error,
        file_name: &OsStr,
        sink: &mut dyn StatusSink,
    ) -> FileResult {
        warn!(?source, ?destination, %error, "Error saving file");
        sink.emit(&t!("error_saving", file = file_name.to_string_lossy()));
        self.stats.copy_failed += 1;

        FileResult {
            source: source.to_path_buf(),
            destination,
            capture_time: Some(capture_time),
            status: ProcessingStatus::CopyFailed,
            error: Some(error.to_string()),
        }
    }
}

/// Copy contents and permissions, then carry over access and modification times
fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    fs::copy(source, dest)?;

    if let Ok(metadata) = fs::metadata(source) {
        let atime = FileTime::from_last_access_time(&metadata);
        let mtime = FileTime::from_last_modification_time(&metadata);
        let _ = filetime::set_file_times(dest, atime, mtime);
    }

    Ok(())
}

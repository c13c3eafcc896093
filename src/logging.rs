//! Log file layer
//!
//! Log records go through a non-blocking appender. Its [`WorkerGuard`] must be
//! dropped before the process exits, otherwise buffered records are lost.

use crate::Result;
use std::fs::{self, OpenOptions};
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

pub type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Build the log file layer, written through a non-blocking appender
///
/// The file is truncated. `RUST_LOG` overrides the default level, which is
/// `info`, or `debug` when `verbose` is set.
pub fn file_layer(log_path: &Path, verbose: bool, json: bool) -> Result<(BoxedLayer, WorkerGuard)> {
    if let Some(parent) = log_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let layer = if json {
        fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(non_blocking)
            .with_filter(filter)
            .boxed()
    } else {
        fmt::layer()
            .with_ansi(false)
            .with_writer(non_blocking)
            .with_filter(filter)
            .boxed()
    };

    Ok((layer, guard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tracing::error;
    use tracing_subscriber::prelude::*;

    fn log_with(layer: BoxedLayer, message: &'static str) {
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            error!(dir = "/missing/parent/out", "{}", message);
        });
    }

    #[test]
    fn test_dropping_guard_flushes_log_file() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("logs").join("run.log");

        let (layer, guard) = file_layer(&log_path, false, false).unwrap();
        log_with(layer, "Cannot prepare output directory");
        drop(guard);

        let contents = fs::read_to_string(&log_path).unwrap();
        assert!(contents.contains("Cannot prepare output directory"));
        assert!(contents.contains("/missing/parent/out"));
    }

    #[test]
    fn test_json_log_file() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("run.json");

        let (layer, guard) = file_layer(&log_path, true, true).unwrap();
        log_with(layer, "Processing failed");
        drop(guard);

        let contents = fs::read_to_string(&log_path).unwrap();
        let line = contents.lines().next().unwrap();
        assert!(line.starts_with('{'));
        assert!(line.contains("\"level\":\"ERROR\""));
        assert!(line.contains("Processing failed"));
    }

    #[test]
    fn test_log_file_is_truncated() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("run.log");
        fs::write(&log_path, "stale line from an earlier run\n").unwrap();

        let (_layer, guard) = file_layer(&log_path, false, false).unwrap();
        drop(guard);

        let contents = fs::read_to_string(&log_path).unwrap();
        assert!(!contents.contains("stale line"));
    }
}

//! Capture time resolution
//!
//! A file is opened once, its container format is sniffed from the magic
//! bytes, and the EXIF `DateTimeOriginal` tag is read from the same handle.
//!
//! Failing to open the file or to recognize it as an image is a hard fault
//! and is returned as an error. Everything that goes wrong after that point
//! (no EXIF block, missing tag, malformed value) resolves to
//! [`CaptureTime::Unknown`] with the reason attached.

pub mod exif;

#[cfg(test)]
pub(crate) mod fixtures;

use crate::error::{Error, Result};
use chrono::NaiveDateTime;
use image::ImageReader;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Seek};
use std::path::Path;
use tracing::debug;

/// Prefix used in output file names when no capture time is known
pub const UNKNOWN_PREFIX: &str = "none";

/// Format of the chronological file name prefix
pub const PREFIX_FORMAT: &str = "%Y-%m-%d %H-%M-%S";

/// Why a capture time could not be determined
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnknownReason {
    /// The file carries no readable EXIF block
    NoExif(String),
    /// EXIF is present but has no `DateTimeOriginal` tag
    TagMissing,
    /// The tag is not stored as ASCII
    NotAscii,
    /// The tag value does not match `YYYY:MM:DD HH:MM:SS`
    Malformed(String),
}

impl fmt::Display for UnknownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownReason::NoExif(message) => write!(f, "no EXIF data ({})", message),
            UnknownReason::TagMissing => write!(f, "DateTimeOriginal tag missing"),
            UnknownReason::NotAscii => write!(f, "DateTimeOriginal tag is not ASCII"),
            UnknownReason::Malformed(raw) => write!(f, "malformed DateTimeOriginal {:?}", raw),
        }
    }
}

/// Resolved capture time of a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureTime {
    /// Timestamp read from `DateTimeOriginal`
    Known(NaiveDateTime),
    /// No usable timestamp
    Unknown(UnknownReason),
}

impl CaptureTime {
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            CaptureTime::Known(ts) => Some(*ts),
            CaptureTime::Unknown(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, CaptureTime::Known(_))
    }

    /// File name prefix: `YYYY-MM-DD HH-MM-SS`, or `none` when unknown
    pub fn prefix(&self) -> String {
        match self {
            CaptureTime::Known(ts) => ts.format(PREFIX_FORMAT).to_string(),
            CaptureTime::Unknown(_) => UNKNOWN_PREFIX.to_string(),
        }
    }
}

/// Open `path` as an image and resolve its original capture time
pub fn resolve_capture_time(path: &Path) -> Result<CaptureTime> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let format = {
        let image = ImageReader::new(&mut reader).with_guessed_format()?;
        image.format()
    };
    let Some(format) = format else {
        return Err(Error::NotAnImage {
            path: path.to_path_buf(),
        });
    };
    debug!(?path, ?format, "Recognized image container");

    reader.rewind()?;
    let time = exif::read_capture_time(&mut reader);
    match &time {
        CaptureTime::Known(ts) => debug!(?path, timestamp = %ts, "Resolved capture time"),
        CaptureTime::Unknown(reason) => debug!(?path, %reason, "Capture time unknown"),
    }

    Ok(time)
}

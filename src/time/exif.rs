//! EXIF `DateTimeOriginal` extraction

use super::{CaptureTime, UnknownReason};
use ::exif::{In, Reader, Tag, Value};
use chrono::NaiveDateTime;
use std::io::{BufRead, Seek};
use tracing::trace;

/// EXIF date-time layout: "YYYY:MM:DD HH:MM:SS"
const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Read the original capture time from an image container
///
/// Never fails: every problem is folded into [`CaptureTime::Unknown`].
pub fn read_capture_time<R: BufRead + Seek>(reader: &mut R) -> CaptureTime {
    let exif = match Reader::new().read_from_container(reader) {
        Ok(exif) => exif,
        Err(e) => return CaptureTime::Unknown(UnknownReason::NoExif(e.to_string())),
    };

    let Some(field) = exif.get_field(Tag::DateTimeOriginal, In::PRIMARY) else {
        return CaptureTime::Unknown(UnknownReason::TagMissing);
    };

    let raw = match field.value {
        Value::Ascii(ref vec) if !vec.is_empty() => String::from_utf8_lossy(&vec[0]).into_owned(),
        _ => return CaptureTime::Unknown(UnknownReason::NotAscii),
    };
    trace!(%raw, "Found DateTimeOriginal");

    match parse_exif_datetime(&raw) {
        Some(ts) => CaptureTime::Known(ts),
        None => CaptureTime::Unknown(UnknownReason::Malformed(raw)),
    }
}

/// Parse an EXIF datetime string, strictly "YYYY:MM:DD HH:MM:SS"
///
/// Only trailing NUL padding is tolerated. chrono alone is too lenient
/// (signed years, flexible whitespace), so the layout is checked first.
pub fn parse_exif_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim_end_matches('\0');
    if !has_exif_layout(s) {
        return None;
    }
    NaiveDateTime::parse_from_str(s, EXIF_DATETIME_FORMAT).ok()
}

/// Exactly 19 bytes: digits with ':' at 4, 7, 13, 16 and ' ' at 10
fn has_exif_layout(s: &str) -> bool {
    s.len() == 19
        && s.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 | 13 | 16 => b == b':',
            10 => b == b' ',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixtures;
    use chrono::{Datelike, Timelike};
    use std::io::Cursor;

    #[test]
    fn test_parse_exif_datetime() {
        let dt = parse_exif_datetime("2024:01:15 14:30:00").unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.day(), 15);
        assert_eq!(dt.hour(), 14);
        assert_eq!(dt.minute(), 30);
        assert_eq!(dt.second(), 0);

        // Trailing NUL padding from fixed-size fields
        assert!(parse_exif_datetime("2024:01:15 14:30:00\0\0").is_some());
    }

    #[test]
    fn test_parse_exif_datetime_rejects_other_layouts() {
        assert!(parse_exif_datetime("2024-01-15 14:30:00").is_none());
        assert!(parse_exif_datetime("2024:01:15").is_none());
        assert!(parse_exif_datetime("    :  :     :  :  ").is_none());
        assert!(parse_exif_datetime("2024:13:40 25:61:00").is_none());
        assert!(parse_exif_datetime("invalid").is_none());

        // chrono alone would accept these
        assert!(parse_exif_datetime("2020:05:0112:30:00").is_none());
        assert!(parse_exif_datetime("+2020:05:01 12:30:00").is_none());
        assert!(parse_exif_datetime(" 2020:05:01 12:30:00 ").is_none());
        assert!(parse_exif_datetime("2020:05:01  12:30:00").is_none());
        assert!(parse_exif_datetime("2020:5:01 12:30:00").is_none());
    }

    #[test]
    fn test_padded_tag_in_jpeg_resolves_to_unknown() {
        let bytes = fixtures::jpeg_with_datetime(Some(" 2020:05:01 12:30:00 "));
        let time = read_capture_time(&mut Cursor::new(bytes));
        assert!(matches!(time, CaptureTime::Unknown(UnknownReason::Malformed(_))));
        assert_eq!(time.prefix(), "none");
    }

    #[test]
    fn test_read_from_jpeg_bytes() {
        let bytes = fixtures::jpeg_with_datetime(Some("2019:12:31 23:59:58"));
        let time = read_capture_time(&mut Cursor::new(bytes));
        assert_eq!(time.prefix(), "2019-12-31 23-59-58");
    }

    #[test]
    fn test_read_from_garbage() {
        let time = read_capture_time(&mut Cursor::new(b"not an image".to_vec()));
        assert!(matches!(time, CaptureTime::Unknown(UnknownReason::NoExif(_))));
    }
}

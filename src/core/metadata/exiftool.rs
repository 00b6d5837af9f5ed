//! exiftool-backed metadata extraction.
//!
//! Invokes the external `exiftool` binary once per file with JSON output
//! (`-G -j -n`) and picks the capture date field appropriate for the
//! file's MIME type.

use super::MetadataSource;
use crate::error::MetadataError;
use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Capture date tags tried for JPEG and PNG files, in order
const PHOTO_DATE_TAGS: &[&str] = &["EXIF:DateTimeOriginal", "EXIF:CreateDate", "XMP:CreateDate"];

/// Capture date tags tried for MP4 containers, in order
const MP4_DATE_TAGS: &[&str] = &["QuickTime:CreateDate", "QuickTime:MediaCreateDate"];

/// Metadata source backed by the external exiftool binary
pub struct ExifTool {
    binary: PathBuf,
}

impl ExifTool {
    /// Use `exiftool` from PATH
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("exiftool"),
        }
    }

    /// Use a specific exiftool binary
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for ExifTool {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataSource for ExifTool {
    fn check_available(&self) -> Result<(), MetadataError> {
        let output = Command::new(&self.binary).arg("-ver").output().map_err(|e| {
            MetadataError::ToolUnavailable {
                tool: self.binary.clone(),
                reason: e.to_string(),
            }
        })?;

        if !output.status.success() {
            return Err(MetadataError::ToolUnavailable {
                tool: self.binary.clone(),
                reason: format!("exit status {}", output.status),
            });
        }

        tracing::debug!(
            version = %String::from_utf8_lossy(&output.stdout).trim(),
            "exiftool found"
        );
        Ok(())
    }

    fn capture_date(&self, path: &Path) -> Result<NaiveDateTime, MetadataError> {
        let output = Command::new(&self.binary)
            .arg("-G")
            .arg("-j")
            .arg("-n")
            .arg(path)
            .output()
            .map_err(|e| match e.kind() {
                // The binary vanished mid-run; abort rather than
                // silently falling back for every remaining file
                std::io::ErrorKind::NotFound => MetadataError::ToolUnavailable {
                    tool: self.binary.clone(),
                    reason: e.to_string(),
                },
                _ => MetadataError::ToolFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                },
            })?;

        if !output.status.success() {
            return Err(MetadataError::ToolFailed {
                path: path.to_path_buf(),
                reason: format!("exit status {}", output.status),
            });
        }

        let parsed: Vec<Value> = serde_json::from_slice(&output.stdout).map_err(|e| {
            MetadataError::MalformedOutput {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        let tags = parsed
            .into_iter()
            .next()
            .ok_or_else(|| MetadataError::NoCaptureDate {
                path: path.to_path_buf(),
            })?;

        capture_date_from_tags(&tags, path)
    }
}

/// Pick the capture date out of one file's exiftool tag object.
///
/// Tag choice depends on the MIME type: photos carry EXIF/XMP dates,
/// QuickTime containers carry their own creation tags. An unrecognized
/// MIME type yields `NoCaptureDate` so the caller can fall back.
fn capture_date_from_tags(tags: &Value, path: &Path) -> Result<NaiveDateTime, MetadataError> {
    let mime = tags
        .get("File:MIMEType")
        .and_then(|v| v.as_str())
        .unwrap_or("");

    let no_date = || MetadataError::NoCaptureDate {
        path: path.to_path_buf(),
    };

    match mime {
        "image/jpeg" | "image/png" => PHOTO_DATE_TAGS
            .iter()
            .filter_map(|tag| tags.get(*tag).and_then(|v| v.as_str()))
            .find_map(parse_local_datetime)
            .ok_or_else(no_date),
        "video/quicktime" => tags
            .get("QuickTime:CreationDate")
            .and_then(|v| v.as_str())
            .and_then(parse_zoned_datetime)
            .ok_or_else(no_date),
        "video/mp4" => MP4_DATE_TAGS
            .iter()
            .filter_map(|tag| tags.get(*tag).and_then(|v| v.as_str()))
            .find_map(parse_local_datetime)
            .ok_or_else(no_date),
        _ => Err(no_date()),
    }
}

/// exiftool prints local timestamps as `YYYY:MM:DD HH:MM:SS`
fn parse_local_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), "%Y:%m:%d %H:%M:%S").ok()
}

/// QuickTime creation dates carry a zone suffix, e.g. `+02:00`.
/// The local wall-clock time is what the folder name should reflect.
fn parse_zoned_datetime(s: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_str(s.trim(), "%Y:%m:%d %H:%M:%S%z")
        .map(|dt| dt.naive_local())
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn jpeg_uses_date_time_original() {
        let tags = json!({
            "File:MIMEType": "image/jpeg",
            "EXIF:DateTimeOriginal": "2022:05:14 10:30:00",
            "EXIF:CreateDate": "2023:01:01 00:00:00",
        });

        let date = capture_date_from_tags(&tags, Path::new("IMG_0001.jpg")).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2022, 5, 14));
        assert_eq!(date.hour(), 10);
    }

    #[test]
    fn jpeg_falls_through_to_create_date() {
        let tags = json!({
            "File:MIMEType": "image/jpeg",
            "EXIF:CreateDate": "2022:05:15 08:00:00",
        });

        let date = capture_date_from_tags(&tags, Path::new("IMG_0002.jpg")).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2022, 5, 15));
    }

    #[test]
    fn png_uses_xmp_create_date() {
        let tags = json!({
            "File:MIMEType": "image/png",
            "XMP:CreateDate": "2021:12:31 23:59:59",
        });

        let date = capture_date_from_tags(&tags, Path::new("screenshot.png")).unwrap();
        assert_eq!((date.year(), date.month()), (2021, 12));
    }

    #[test]
    fn quicktime_date_keeps_local_wall_clock() {
        let tags = json!({
            "File:MIMEType": "video/quicktime",
            "QuickTime:CreationDate": "2022:08:01 21:15:00+02:00",
        });

        let date = capture_date_from_tags(&tags, Path::new("VID_0001.mov")).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2022, 8, 1));
        assert_eq!(date.hour(), 21);
    }

    #[test]
    fn mp4_uses_quicktime_create_date() {
        let tags = json!({
            "File:MIMEType": "video/mp4",
            "QuickTime:CreateDate": "2023:03:10 12:00:00",
        });

        let date = capture_date_from_tags(&tags, Path::new("VID_0002.mp4")).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2023, 3, 10));
    }

    #[test]
    fn unknown_mime_type_has_no_capture_date() {
        let tags = json!({
            "File:MIMEType": "application/pdf",
            "EXIF:DateTimeOriginal": "2022:05:14 10:30:00",
        });

        let result = capture_date_from_tags(&tags, Path::new("manual.pdf"));
        assert!(matches!(result, Err(MetadataError::NoCaptureDate { .. })));
    }

    #[test]
    fn malformed_date_has_no_capture_date() {
        let tags = json!({
            "File:MIMEType": "image/jpeg",
            "EXIF:DateTimeOriginal": "0000:00:00 00:00:00",
        });

        let result = capture_date_from_tags(&tags, Path::new("IMG_0003.jpg"));
        assert!(matches!(result, Err(MetadataError::NoCaptureDate { .. })));
    }

    #[test]
    fn missing_binary_is_unavailable() {
        let tool = ExifTool::with_binary("/nonexistent/bin/exiftool-12345");
        let result = tool.check_available();

        assert!(matches!(
            result,
            Err(MetadataError::ToolUnavailable { .. })
        ));
    }
}

//! # Scanner Module
//!
//! Discovers photo and video files under the source directory.
//!
//! ## Supported Formats
//! - Photos: JPEG, PNG, WebP, HEIC/HEIF, GIF, BMP, TIFF, plus common
//!   raw formats (CR2, NEF, DNG, ARW, RAF)
//! - Videos: MP4, MOV, M4V, AVI, MKV, WMV, WebM
//!
//! ## Example
//! ```rust,ignore
//! use photo_organizer::core::scanner::{MediaScanner, ScanConfig, WalkDirScanner};
//!
//! let scanner = WalkDirScanner::new(ScanConfig::default());
//! let result = scanner.scan(Path::new("/phone/export"))?;
//! ```

mod filter;
mod walker;

pub use filter::MediaFilter;
pub use walker::{ScanConfig, WalkDirScanner};

use crate::error::ScanError;
use crate::events::EventSender;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Represents a discovered media file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaFile {
    /// Path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Last modified time
    pub modified: SystemTime,
    /// Detected media kind
    pub kind: MediaKind,
}

impl MediaFile {
    /// The bare file name, lossily decoded.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Broad media categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Photo,
    Video,
    Unknown,
}

impl MediaKind {
    /// Detect kind from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" | "png" | "webp" | "heic" | "heif" | "gif" | "bmp" | "tiff"
            | "tif" | "raw" | "cr2" | "nef" | "dng" | "arw" | "raf" => MediaKind::Photo,
            "mp4" | "mov" | "m4v" | "avi" | "mkv" | "wmv" | "webm" => MediaKind::Video,
            _ => MediaKind::Unknown,
        }
    }

    /// Check if this kind is organizable
    pub fn is_supported(&self) -> bool {
        !matches!(self, MediaKind::Unknown)
    }
}

/// Result of a scan operation
#[derive(Debug)]
pub struct ScanResult {
    /// Successfully discovered media files
    pub files: Vec<MediaFile>,
    /// Errors that occurred during scanning (non-fatal)
    pub errors: Vec<ScanError>,
}

/// Trait for media scanners
///
/// Implement this trait to create custom scanners (e.g., for testing).
/// A missing or unreadable source root is an error; problems with
/// individual entries are collected into [`ScanResult::errors`].
pub trait MediaScanner: Send + Sync {
    /// Scan the source root and return discovered media files
    fn scan(&self, root: &Path) -> Result<ScanResult, ScanError>;

    /// Scan with progress reporting via events
    fn scan_with_events(
        &self,
        root: &Path,
        events: &EventSender,
    ) -> Result<ScanResult, ScanError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_kind_from_extension_lowercase() {
        assert_eq!(MediaKind::from_extension("jpg"), MediaKind::Photo);
        assert_eq!(MediaKind::from_extension("heic"), MediaKind::Photo);
        assert_eq!(MediaKind::from_extension("mp4"), MediaKind::Video);
        assert_eq!(MediaKind::from_extension("mov"), MediaKind::Video);
    }

    #[test]
    fn media_kind_from_extension_uppercase() {
        assert_eq!(MediaKind::from_extension("JPG"), MediaKind::Photo);
        assert_eq!(MediaKind::from_extension("MOV"), MediaKind::Video);
    }

    #[test]
    fn unknown_extension_returns_unknown() {
        assert_eq!(MediaKind::from_extension("txt"), MediaKind::Unknown);
        assert_eq!(MediaKind::from_extension("pdf"), MediaKind::Unknown);
    }

    #[test]
    fn unknown_kind_is_not_supported() {
        assert!(!MediaKind::Unknown.is_supported());
        assert!(MediaKind::Photo.is_supported());
        assert!(MediaKind::Video.is_supported());
    }

    #[test]
    fn file_name_is_the_last_component() {
        let file = MediaFile {
            path: PathBuf::from("/phone/export/DCIM/IMG_0001.jpg"),
            size: 1024,
            modified: SystemTime::UNIX_EPOCH,
            kind: MediaKind::Photo,
        };
        assert_eq!(file.file_name(), "IMG_0001.jpg");
    }
}

//! # Metadata Module
//!
//! Extracts capture timestamps from media files by talking to an
//! external exiftool process.
//!
//! ## Design
//! The tool sits behind the [`MetadataSource`] capability trait: the
//! production implementation shells out to exiftool, while
//! [`StaticMetadata`] is a deterministic stand-in so the planner and
//! executor can be tested without the tool installed.
//!
//! ## Failure Modes
//! - Tool missing or not runnable: fatal for the whole run, detected by
//!   an upfront probe
//! - Tool runs but yields no usable date: recoverable per file; the
//!   caller falls back to the filesystem modification time

mod exiftool;

pub use exiftool::ExifTool;

use crate::error::MetadataError;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Capability interface over the external metadata tool
pub trait MetadataSource: Send + Sync {
    /// Probe the tool once, before any file is processed
    fn check_available(&self) -> Result<(), MetadataError>;

    /// Extract the capture date of a single file
    fn capture_date(&self, path: &Path) -> Result<NaiveDateTime, MetadataError>;
}

/// Fixed path-to-timestamp mapping, for tests and offline use
#[derive(Debug, Default)]
pub struct StaticMetadata {
    dates: HashMap<PathBuf, NaiveDateTime>,
}

impl StaticMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a capture date for a path
    pub fn with_date(mut self, path: impl Into<PathBuf>, date: NaiveDateTime) -> Self {
        self.dates.insert(path.into(), date);
        self
    }
}

impl MetadataSource for StaticMetadata {
    fn check_available(&self) -> Result<(), MetadataError> {
        Ok(())
    }

    fn capture_date(&self, path: &Path) -> Result<NaiveDateTime, MetadataError> {
        self.dates
            .get(path)
            .copied()
            .ok_or_else(|| MetadataError::NoCaptureDate {
                path: path.to_path_buf(),
            })
    }
}

//! # Error Module
//!
//! Error types for the photo organizer.
//!
//! ## Design Principles
//! - **Per-file errors never abort a run** - they are counted and reported
//! - **Fatal conditions surface early** - a missing exiftool or an
//!   unreadable source root is detected before any file is touched
//! - **Include context** - paths, tool output, what went wrong

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum OrganizerError {
    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Copy error: {0}")]
    Copy(#[from] CopyError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors from the external metadata tool
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Metadata tool {tool} is not available: {reason}")]
    ToolUnavailable { tool: PathBuf, reason: String },

    #[error("Metadata tool failed on {path}: {reason}")]
    ToolFailed { path: PathBuf, reason: String },

    #[error("No usable capture date in {path}")]
    NoCaptureDate { path: PathBuf },

    #[error("Unreadable metadata output for {path}: {reason}")]
    MalformedOutput { path: PathBuf, reason: String },
}

impl MetadataError {
    /// Whether this error should abort the whole run.
    ///
    /// Everything except a missing tool is recoverable per file by
    /// falling back to the filesystem modification time.
    pub fn is_fatal(&self) -> bool {
        matches!(self, MetadataError::ToolUnavailable { .. })
    }
}

/// Errors that occur while discovering source files
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Source directory not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    ReadEntry {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while copying a file into the destination
#[derive(Error, Debug)]
pub enum CopyError {
    #[error("Failed to create destination folder {path}: {source}")]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {source_path} to {destination}: {source}")]
    CopyFailed {
        source_path: PathBuf,
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No free rename suffix left for {path} (gave up after {limit} tries)")]
    RenameSpaceExhausted { path: PathBuf, limit: u32 },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, OrganizerError>;

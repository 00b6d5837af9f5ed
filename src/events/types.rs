//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by an organizer run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Source discovery events
    Scan(ScanEvent),
    /// Per-file planning and copy events
    Organize(OrganizeEvent),
    /// Run-level events
    Run(RunEvent),
}

/// Events during source discovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Scanning has started
    Started { source: PathBuf },
    /// Progress update during scanning
    Progress(ScanProgress),
    /// A media file was found
    FileFound { path: PathBuf },
    /// An error occurred but scanning continues
    Error { path: PathBuf, message: String },
    /// Scanning completed
    Completed { total_files: usize },
}

/// Progress information during scanning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanProgress {
    /// Number of directories scanned so far
    pub directories_scanned: usize,
    /// Number of media files found so far
    pub files_found: usize,
    /// Current directory being scanned
    pub current_path: PathBuf,
}

/// Per-file events while planning and copying
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OrganizeEvent {
    /// The file had no usable capture date; its modification time is
    /// used instead
    FallbackApplied { path: PathBuf },
    /// A matching file (same name and size) already exists at the
    /// destination
    FileSkipped { path: PathBuf, destination: PathBuf },
    /// The file was copied (or would be, under dry-run)
    FileCopied { path: PathBuf, destination: PathBuf },
    /// A name collision forced a renamed target
    FileRenamed { path: PathBuf, destination: PathBuf },
    /// The file could not be processed; the run continues
    FileFailed { path: PathBuf, message: String },
}

/// Run-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RunEvent {
    /// The run has started
    Started { dry_run: bool },
    /// The run completed (per-file failures are counted, not fatal)
    Completed { summary: RunSummary },
    /// The run hit a fatal error and stopped early
    Error { message: String },
}

/// Counts accumulated over one run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Total media files fed into the pipeline
    pub files_processed: usize,
    /// Files copied under their own name
    pub copied: usize,
    /// Files already present at the destination (same name and size)
    pub skipped: usize,
    /// Files copied under a suffixed name after a collision
    pub renamed: usize,
    /// Files that could not be processed
    pub failed: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

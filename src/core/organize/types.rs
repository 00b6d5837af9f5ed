//! Types for the organize module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What the planner decided for one source file
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlanDecision {
    /// A file with the same name and size already exists at the
    /// destination
    Skip,
    /// No conflict; copy under the original name
    Copy,
    /// Name collision with a different size; copy under a suffixed name
    CopyRenamed,
}

/// A concrete action for one source file
#[derive(Debug, Clone)]
pub struct PlannedCopy {
    /// The source file
    pub source: PathBuf,
    /// Full target path, including the (possibly renamed) file name
    pub destination: PathBuf,
    /// The decision that produced this target
    pub decision: PlanDecision,
    /// Source size in bytes, recorded into the index once the copy lands
    pub size: u64,
}

impl PlannedCopy {
    /// The destination folder this copy lands in
    pub fn folder(&self) -> &std::path::Path {
        self.destination.parent().unwrap_or(std::path::Path::new(""))
    }

    /// The target file name, lossily decoded
    pub fn target_name(&self) -> String {
        self.destination
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

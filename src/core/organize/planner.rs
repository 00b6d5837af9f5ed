//! Per-file copy planning.

use super::index::DestinationIndex;
use super::namer::month_folder;
use super::types::{PlanDecision, PlannedCopy};
use crate::core::scanner::MediaFile;
use crate::error::CopyError;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// Suffix cap for rename-on-collision; past this the file fails
const MAX_RENAME_SUFFIX: u32 = 10_000;

/// Decides, per source file, whether a copy is needed and where it goes
pub struct CopyPlanner {
    destination_root: PathBuf,
}

impl CopyPlanner {
    pub fn new(destination_root: impl Into<PathBuf>) -> Self {
        Self {
            destination_root: destination_root.into(),
        }
    }

    /// Plan one file.
    ///
    /// Consults (and relies on the caller updating) the destination
    /// index: a same-name same-size entry means skip, a same-name
    /// different-size entry forces a renamed target with the lowest
    /// free numeric suffix.
    pub fn plan(
        &self,
        file: &MediaFile,
        taken: NaiveDateTime,
        index: &mut DestinationIndex,
    ) -> Result<PlannedCopy, CopyError> {
        let folder = self.destination_root.join(month_folder(taken));
        let name = file.file_name();

        let (decision, target_name) = match index.size_of(&folder, &name) {
            Some(size) if size == file.size => (PlanDecision::Skip, name),
            Some(_) => (
                PlanDecision::CopyRenamed,
                Self::free_renamed_target(&folder, &name, index)?,
            ),
            None => (PlanDecision::Copy, name),
        };

        Ok(PlannedCopy {
            source: file.path.clone(),
            destination: folder.join(target_name),
            decision,
            size: file.size,
        })
    }

    /// Lowest-suffix free name of the form `stem_N.ext`, starting at 1.
    ///
    /// Bounded so a pathological folder cannot loop forever.
    fn free_renamed_target(
        folder: &Path,
        name: &str,
        index: &mut DestinationIndex,
    ) -> Result<String, CopyError> {
        let path = Path::new(name);
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("file");
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        for suffix in 1..=MAX_RENAME_SUFFIX {
            let candidate = if ext.is_empty() {
                format!("{}_{}", stem, suffix)
            } else {
                format!("{}_{}.{}", stem, suffix, ext)
            };

            if !index.contains(folder, &candidate) {
                return Ok(candidate);
            }
        }

        Err(CopyError::RenameSpaceExhausted {
            path: folder.join(name),
            limit: MAX_RENAME_SUFFIX,
        })
    }
}

//! Copy execution.

use super::types::PlannedCopy;
use crate::error::CopyError;
use filetime::FileTime;
use std::fs;

/// Applies planned copies to the filesystem.
///
/// Under dry-run the executor performs no filesystem mutation at all;
/// not even destination folders are created.
pub struct CopyExecutor {
    dry_run: bool,
}

impl CopyExecutor {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Copy one planned file into place, preserving the source's
    /// modification time.
    pub fn execute(&self, planned: &PlannedCopy) -> Result<(), CopyError> {
        if self.dry_run {
            tracing::debug!(
                source = %planned.source.display(),
                destination = %planned.destination.display(),
                "dry-run, not copying"
            );
            return Ok(());
        }

        let folder = planned.folder();
        fs::create_dir_all(folder).map_err(|e| CopyError::CreateDirFailed {
            path: folder.to_path_buf(),
            source: e,
        })?;

        fs::copy(&planned.source, &planned.destination).map_err(|e| CopyError::CopyFailed {
            source_path: planned.source.clone(),
            destination: planned.destination.clone(),
            source: e,
        })?;

        // Keep the original mtime so the destination sorts by capture-era
        // timestamps; failure here is not worth failing the file over
        if let Ok(modified) = fs::metadata(&planned.source).and_then(|m| m.modified()) {
            let _ = filetime::set_file_mtime(
                &planned.destination,
                FileTime::from_system_time(modified),
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::types::PlanDecision;
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn planned(source: &std::path::Path, destination: &std::path::Path) -> PlannedCopy {
        PlannedCopy {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            decision: PlanDecision::Copy,
            size: 12,
        }
    }

    #[test]
    fn execute_copies_and_creates_folders() {
        let src_dir = TempDir::new().unwrap();
        let dest_dir = TempDir::new().unwrap();

        let src = src_dir.path().join("IMG_0001.jpg");
        let mut f = File::create(&src).unwrap();
        f.write_all(b"test content").unwrap();

        let dest = dest_dir.path().join("2022-05").join("IMG_0001.jpg");
        let executor = CopyExecutor::new(false);
        executor.execute(&planned(&src, &dest)).unwrap();

        assert!(src.exists());
        assert!(dest.exists());
        assert_eq!(fs::read(&dest).unwrap(), b"test content");
    }

    #[test]
    fn execute_preserves_modification_time() {
        let src_dir = TempDir::new().unwrap();
        let dest_dir = TempDir::new().unwrap();

        let src = src_dir.path().join("IMG_0001.jpg");
        File::create(&src).unwrap().write_all(b"x").unwrap();

        // Push the source mtime well into the past
        let past = FileTime::from_unix_time(1_000_000_000, 0);
        filetime::set_file_mtime(&src, past).unwrap();

        let dest = dest_dir.path().join("2022-05").join("IMG_0001.jpg");
        CopyExecutor::new(false).execute(&planned(&src, &dest)).unwrap();

        let dest_mtime = FileTime::from_last_modification_time(&fs::metadata(&dest).unwrap());
        assert_eq!(dest_mtime.unix_seconds(), past.unix_seconds());
    }

    #[test]
    fn dry_run_touches_nothing() {
        let src_dir = TempDir::new().unwrap();
        let dest_dir = TempDir::new().unwrap();

        let src = src_dir.path().join("IMG_0001.jpg");
        File::create(&src).unwrap().write_all(b"x").unwrap();

        let dest = dest_dir.path().join("2022-05").join("IMG_0001.jpg");
        CopyExecutor::new(true).execute(&planned(&src, &dest)).unwrap();

        assert!(!dest.exists());
        // Not even the subfolder is created
        assert!(!dest_dir.path().join("2022-05").exists());
    }

    #[test]
    fn missing_source_fails_the_file() {
        let dest_dir = TempDir::new().unwrap();
        let dest = dest_dir.path().join("2022-05").join("IMG_0001.jpg");

        let result = CopyExecutor::new(false)
            .execute(&planned(std::path::Path::new("/nonexistent/IMG_0001.jpg"), &dest));

        assert!(matches!(result, Err(CopyError::CopyFailed { .. })));
    }
}

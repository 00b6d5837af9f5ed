//! Name/size index of destination subfolders.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Lazy per-subfolder index of files already present at the destination.
///
/// Each subfolder is scanned (non-recursively) the first time a source
/// file is routed to it. Copies performed during the run are recorded
/// back into the index so later duplicate checks see them; a subfolder
/// that does not exist yet simply has an empty index.
///
/// Built fresh for every run and passed to the planner explicitly; no
/// state survives between runs besides the destination files themselves.
#[derive(Debug, Default)]
pub struct DestinationIndex {
    folders: HashMap<PathBuf, HashMap<String, u64>>,
}

impl DestinationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size of the entry under `name` in `folder`, if present
    pub fn size_of(&mut self, folder: &Path, name: &str) -> Option<u64> {
        self.entries(folder).get(name).copied()
    }

    /// Whether `folder` already holds an entry under `name`
    pub fn contains(&mut self, folder: &Path, name: &str) -> bool {
        self.entries(folder).contains_key(name)
    }

    /// Record a file that just landed (or is planned to land) in `folder`
    pub fn record(&mut self, folder: &Path, name: &str, size: u64) {
        self.entries_mut(folder).insert(name.to_string(), size);
    }

    fn entries(&mut self, folder: &Path) -> &HashMap<String, u64> {
        self.entries_mut(folder)
    }

    fn entries_mut(&mut self, folder: &Path) -> &mut HashMap<String, u64> {
        if !self.folders.contains_key(folder) {
            let loaded = Self::load(folder);
            self.folders.insert(folder.to_path_buf(), loaded);
        }
        self.folders.get_mut(folder).expect("just inserted")
    }

    /// Scan one destination subfolder, non-recursively.
    ///
    /// A missing folder is an empty index, not an error; it will be
    /// created right before the first real copy into it.
    fn load(folder: &Path) -> HashMap<String, u64> {
        let mut entries = HashMap::new();

        let dir = match fs::read_dir(folder) {
            Ok(dir) => dir,
            Err(_) => return entries,
        };

        for entry in dir.flatten() {
            let Ok(metadata) = entry.metadata() else {
                continue;
            };
            if !metadata.is_file() {
                continue;
            }
            entries.insert(
                entry.file_name().to_string_lossy().into_owned(),
                metadata.len(),
            );
        }

        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn missing_folder_is_empty() {
        let mut index = DestinationIndex::new();
        assert!(!index.contains(Path::new("/nonexistent/2022-05"), "IMG_0001.jpg"));
    }

    #[test]
    fn index_reflects_existing_files() {
        let temp = TempDir::new().unwrap();
        let mut file = File::create(temp.path().join("IMG_0001.jpg")).unwrap();
        file.write_all(&[0u8; 123]).unwrap();

        let mut index = DestinationIndex::new();
        assert_eq!(index.size_of(temp.path(), "IMG_0001.jpg"), Some(123));
        assert_eq!(index.size_of(temp.path(), "IMG_0002.jpg"), None);
    }

    #[test]
    fn index_is_not_recursive() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("nested");
        fs::create_dir(&nested).unwrap();
        File::create(nested.join("IMG_0001.jpg")).unwrap();

        let mut index = DestinationIndex::new();
        assert!(!index.contains(temp.path(), "IMG_0001.jpg"));
    }

    #[test]
    fn recorded_entries_are_visible() {
        let temp = TempDir::new().unwrap();
        let mut index = DestinationIndex::new();

        index.record(temp.path(), "IMG_0001.jpg", 500);
        assert_eq!(index.size_of(temp.path(), "IMG_0001.jpg"), Some(500));
    }

    #[test]
    fn recording_does_not_reload_from_disk() {
        let temp = TempDir::new().unwrap();
        let mut index = DestinationIndex::new();

        // Recording into a not-yet-scanned folder pins its (empty) state
        index.record(temp.path(), "planned.jpg", 10);

        // A file appearing on disk afterwards is not seen; the run's
        // view of the folder stays consistent
        File::create(temp.path().join("late.jpg")).unwrap();
        assert!(index.contains(temp.path(), "planned.jpg"));
        assert!(!index.contains(temp.path(), "late.jpg"));
    }

    #[test]
    fn name_match_is_case_sensitive() {
        let temp = TempDir::new().unwrap();
        File::create(temp.path().join("IMG_0001.jpg")).unwrap();

        let mut index = DestinationIndex::new();
        assert!(index.contains(temp.path(), "IMG_0001.jpg"));
        assert!(!index.contains(temp.path(), "img_0001.jpg"));
    }
}

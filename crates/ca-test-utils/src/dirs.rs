//! [`TestDirs`] fixture for watcher test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary root holding a `source/` and a `dest/` directory.
///
/// # Example
///
/// ```rust,no_run
/// use ca_test_utils::dirs::TestDirs;
///
/// let dirs = TestDirs::new();
/// dirs.write_source("ca1.crt", "pem");
/// assert_eq!(dirs.source_names(), vec!["ca1.crt"]);
/// ```
pub struct TestDirs {
    temp_dir: TempDir,
}

impl Default for TestDirs {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDirs {
    /// Create the temporary root with empty `source/` and `dest/`.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("source")).unwrap();
        fs::create_dir(temp_dir.path().join("dest")).unwrap();
        Self { temp_dir }
    }

    /// Return the temporary root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn source(&self) -> PathBuf {
        self.root().join("source")
    }

    pub fn dest(&self) -> PathBuf {
        self.root().join("dest")
    }

    /// Write `content` to `source/<name>`.
    pub fn write_source(&self, name: &str, content: &str) {
        fs::write(self.source().join(name), content).unwrap();
    }

    /// Write `content` to `dest/<name>`.
    pub fn write_dest(&self, name: &str, content: &str) {
        fs::write(self.dest().join(name), content).unwrap();
    }

    /// Remove `source/<name>`.
    pub fn remove_source(&self, name: &str) {
        fs::remove_file(self.source().join(name)).unwrap();
    }

    /// Remove every file in `source/`.
    pub fn clear_source(&self) {
        for name in self.source_names() {
            self.remove_source(&name);
        }
    }

    /// Sorted file names in `source/`.
    pub fn source_names(&self) -> Vec<String> {
        names_in(&self.source())
    }

    /// Sorted file names in `dest/`.
    pub fn dest_names(&self) -> Vec<String> {
        names_in(&self.dest())
    }

    /// Content of `dest/<name>`.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read_dest(&self, name: &str) -> String {
        let path = self.dest().join(name);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Assert that every file in `dest/` starts with `tag`.
    ///
    /// # Panics
    /// Panics with the offending names otherwise.
    pub fn assert_dest_all_tagged(&self, tag: &str) {
        let names = self.dest_names();
        let untagged: Vec<&String> = names.iter().filter(|n| !n.starts_with(tag)).collect();
        assert!(
            untagged.is_empty(),
            "Expected every destination file to carry tag {}, found: {:?}",
            tag,
            untagged
        );
    }
}

fn names_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap_or_else(|_| panic!("Could not list directory: {}", dir.display()))
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

use std::path::Path;

use crate::Result;

/// A single entry returned by [`FileSystem::list_dir`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DirEntry {
    /// File name relative to the listed directory
    pub name: String,
    /// Whether the entry resolves to a directory
    pub is_dir: bool,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }
}

/// Filesystem operations the sync core depends on.
///
/// Implementations must be shareable across threads; the watcher host runs
/// iterations on a blocking worker thread.
pub trait FileSystem: Send + Sync {
    /// List the direct children of `dir`, sorted by name.
    fn list_dir(&self, dir: &Path) -> Result<Vec<DirEntry>>;

    /// Read the whole content of the file at `path`.
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;

    /// Create or replace the file at `path` with `content`.
    fn write_file(&self, path: &Path, content: &[u8]) -> Result<()>;

    /// Remove the file at `path`.
    fn remove_file(&self, path: &Path) -> Result<()>;
}

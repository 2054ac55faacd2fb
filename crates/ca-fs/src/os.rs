//! Real filesystem implementation with atomic writes

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{DirEntry, Error, FileSystem, Result};

/// Monotonic suffix so concurrent writers in one process never share a temp file.
static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Settings for [`OsFileSystem::write_file`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Flush the temp file to disk before it is renamed into place.
    pub fsync: bool,
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem {
    options: WriteOptions,
}

impl OsFileSystem {
    /// Create an OsFileSystem with default write options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an OsFileSystem with custom write options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> WriteOptions {
        self.options
    }
}

impl FileSystem for OsFileSystem {
    /// Entries are classified by following symlinks, so a symlink to a
    /// directory is reported as a directory and a dangling symlink as a file.
    fn list_dir(&self, dir: &Path) -> Result<Vec<DirEntry>> {
        let read_dir = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| Error::io(dir, e))?;
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    tracing::warn!(dir = %dir.display(), name = ?raw, "Skipping non UTF-8 file name");
                    continue;
                }
            };
            let is_dir = fs::metadata(entry.path())
                .map(|m| m.is_dir())
                .unwrap_or(false);
            entries.push(DirEntry { name, is_dir });
        }

        entries.sort();
        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| Error::io(path, e))
    }

    /// Write content atomically.
    ///
    /// Uses write-to-temp-then-rename in the target directory so readers of the
    /// trust store never observe a partially written certificate.
    fn write_file(&self, path: &Path, content: &[u8]) -> Result<()> {
        let temp_path = temp_path_for(path);

        let result = write_temp(&temp_path, content, self.options)
            .and_then(|()| fs::rename(&temp_path, path).map_err(|e| Error::io(path, e)));

        if result.is_err() {
            // Best effort; the temp file may never have been created.
            let _ = fs::remove_file(&temp_path);
        }
        result
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(|e| Error::io(path, e))
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let temp_name = format!(
        ".{}.{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    );
    path.with_file_name(temp_name)
}

fn write_temp(temp_path: &Path, content: &[u8], options: WriteOptions) -> Result<()> {
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_path, e))?;

    if options.fsync {
        temp_file
            .sync_all()
            .map_err(|e| Error::io(temp_path, e))?;
    }

    Ok(())
}

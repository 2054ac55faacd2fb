//! Tagged copy of the source directory

use std::path::Path;

use ca_fs::FileSystem;

use super::report::{FileFailure, SyncReport};
use crate::name::TaggedName;
use crate::tag::CopyTag;
use crate::{Error, Result};

/// Copies every source file into the destination under a tagged name
pub struct Synchronizer<'a> {
    fs: &'a dyn FileSystem,
    source_dir: &'a Path,
    dest_dir: &'a Path,
}

impl<'a> Synchronizer<'a> {
    pub fn new(fs: &'a dyn FileSystem, source_dir: &'a Path, dest_dir: &'a Path) -> Self {
        Self {
            fs,
            source_dir,
            dest_dir,
        }
    }

    /// Copy every file in the source directory to `<dest>/<tag><name>`.
    ///
    /// Subdirectories are skipped. A file that cannot be read or written is
    /// recorded in the report and the remaining files are still copied.
    /// Source files are never modified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ListDir`] if the source directory cannot be listed.
    pub fn sync_all(&self, tag: &CopyTag) -> Result<SyncReport> {
        let entries = self.fs.list_dir(self.source_dir).map_err(|source| Error::ListDir {
            path: self.source_dir.to_path_buf(),
            source,
        })?;

        let mut report = SyncReport::default();
        for entry in entries {
            if entry.is_dir {
                report.skipped_dirs.push(entry.name);
                continue;
            }

            let content = match self.fs.read_file(&self.source_dir.join(&entry.name)) {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!(file = %entry.name, error = %e, "Couldn't read source file");
                    report.failed.push(FileFailure::new(entry.name, e));
                    continue;
                }
            };

            match self.write_tagged(tag, &entry.name, &content) {
                Ok(written) => {
                    tracing::debug!(file = %entry.name, copy = %written, "Copied source file");
                    report.copied.push(written);
                }
                Err(e) => {
                    tracing::warn!(file = %entry.name, error = %e, "Couldn't copy file to destination");
                    report.failed.push(FileFailure::new(entry.name, e));
                }
            }
        }

        Ok(report)
    }

    fn write_tagged(&self, tag: &CopyTag, name: &str, content: &[u8]) -> Result<String> {
        let tagged = TaggedName::new(tag.clone(), name)?.to_string();
        self.fs.write_file(&self.dest_dir.join(&tagged), content)?;
        Ok(tagged)
    }
}

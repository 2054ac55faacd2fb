//! Removal of stale tagged copies

use std::path::Path;

use ca_fs::FileSystem;

use super::report::{FileFailure, PruneReport};
use crate::name::TaggedName;
use crate::tag::CopyTag;
use crate::{Error, Result};

/// Removes destination files written by earlier passes
pub struct Pruner<'a> {
    fs: &'a dyn FileSystem,
    dest_dir: &'a Path,
}

impl<'a> Pruner<'a> {
    pub fn new(fs: &'a dyn FileSystem, dest_dir: &'a Path) -> Self {
        Self { fs, dest_dir }
    }

    /// Remove every tagged file whose tag strictly precedes `current`.
    ///
    /// Files tagged at or after `current` are kept, as are directories and
    /// untagged files.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ListDir`] if the destination cannot be listed. A file
    /// that cannot be removed is recorded in the report and left for the next
    /// pass.
    pub fn prune_older_than(&self, current: &CopyTag) -> Result<PruneReport> {
        let entries = self.fs.list_dir(self.dest_dir).map_err(|source| Error::ListDir {
            path: self.dest_dir.to_path_buf(),
            source,
        })?;

        let mut report = PruneReport::default();
        for entry in entries {
            let tagged = if entry.is_dir {
                None
            } else {
                TaggedName::parse(&entry.name)
            };
            let Some(tagged) = tagged else {
                tracing::debug!(file = %entry.name, "Leaving untagged destination entry alone");
                report.ignored.push(entry.name);
                continue;
            };

            if tagged.tag() >= current {
                report.kept.push(entry.name);
                continue;
            }

            match self.fs.remove_file(&self.dest_dir.join(&entry.name)) {
                Ok(()) => {
                    tracing::debug!(file = %entry.name, "Removed stale copy");
                    report.removed.push(entry.name);
                }
                Err(e) => {
                    tracing::warn!(file = %entry.name, error = %e, "Couldn't remove stale copy");
                    report.failed.push(FileFailure::new(entry.name, e));
                }
            }
        }

        Ok(report)
    }
}

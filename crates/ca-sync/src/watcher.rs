//! TrustStoreWatcher implementation
//!
//! The watcher owns the source/destination pair and the filesystem handle.
//! It keeps no per-pass state: the caller issues a [`CopyTag`] for each
//! iteration and the same value is threaded through prune and sync.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ca_fs::FileSystem;

use crate::name::TaggedName;
use crate::sync::{
    ChangeDetector, Detection, IterationReport, PruneReport, Pruner, SyncReport, Synchronizer,
};
use crate::tag::CopyTag;
use crate::{Error, Result};

/// Options for [`TrustStoreWatcher::run_iteration`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatcherOptions {
    /// Skip change detection and prune/sync on every iteration.
    pub always_sync: bool,
}

/// Mirrors a source directory of certificates into a tagged destination
///
/// Each iteration moves through `Detecting → Pruning → Synchronizing`:
/// - **detect**: compare source with the current tagged copies
/// - **prune**: remove copies tagged before this iteration
/// - **sync**: write every source file under this iteration's tag
pub struct TrustStoreWatcher {
    source_dir: PathBuf,
    dest_dir: PathBuf,
    fs: Arc<dyn FileSystem>,
    options: WatcherOptions,
}

impl std::fmt::Debug for TrustStoreWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrustStoreWatcher")
            .field("source_dir", &self.source_dir)
            .field("dest_dir", &self.dest_dir)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl TrustStoreWatcher {
    /// Create a new TrustStoreWatcher
    ///
    /// # Errors
    ///
    /// Returns [`Error::SameDirectory`] if both paths are equal. Paths are not
    /// resolved; a missing or empty path surfaces as a listing failure later.
    pub fn new(
        source_dir: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
        fs: Arc<dyn FileSystem>,
    ) -> Result<Self> {
        let source_dir = source_dir.into();
        let dest_dir = dest_dir.into();
        if source_dir == dest_dir {
            return Err(Error::SameDirectory { path: source_dir });
        }
        Ok(Self {
            source_dir,
            dest_dir,
            fs,
            options: WatcherOptions::default(),
        })
    }

    pub fn with_options(mut self, options: WatcherOptions) -> Self {
        self.options = options;
        self
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn dest_dir(&self) -> &Path {
        &self.dest_dir
    }

    pub fn options(&self) -> WatcherOptions {
        self.options
    }

    /// Compare source and destination and say why a pass is or is not needed.
    pub fn detect(&self) -> Detection {
        ChangeDetector::new(self.fs.as_ref(), &self.source_dir, &self.dest_dir).detect()
    }

    /// Whether the next iteration has anything to do.
    pub fn should_run(&self) -> bool {
        self.detect().should_run()
    }

    /// Remove destination copies tagged before `tag`.
    pub fn prune_older_than(&self, tag: &CopyTag) -> Result<PruneReport> {
        Pruner::new(self.fs.as_ref(), &self.dest_dir).prune_older_than(tag)
    }

    /// Copy every source file into the destination under `tag`.
    pub fn sync_all(&self, tag: &CopyTag) -> Result<SyncReport> {
        Synchronizer::new(self.fs.as_ref(), &self.source_dir, &self.dest_dir).sync_all(tag)
    }

    /// Run one detect-prune-sync iteration under `tag`.
    ///
    /// Pruning always runs before copying, so nothing written under `tag`
    /// is visible to this iteration's prune step.
    ///
    /// # Errors
    ///
    /// A directory that cannot be listed aborts the iteration. Per-file
    /// failures are reported in the returned [`IterationReport`] instead.
    pub fn run_iteration(&self, tag: &CopyTag) -> Result<IterationReport> {
        if !self.options.always_sync {
            match self.detect() {
                Detection::Changed(reason) => {
                    tracing::debug!(?reason, "Change detected");
                }
                Detection::Unchanged | Detection::Unavailable => {
                    return Ok(IterationReport::skipped(tag.clone()));
                }
            }
        }

        let prune = self.prune_older_than(tag)?;
        let sync = self.sync_all(tag)?;

        let report = IterationReport::completed(tag.clone(), prune, sync);
        tracing::info!(tag = %tag, failures = report.failure_count(), "{}", report.summary());
        Ok(report)
    }

    /// Newest tag carried by any file in the destination.
    ///
    /// Used to seed the tag clock after a restart so a new process never
    /// issues a tag older than copies it already wrote.
    pub fn newest_dest_tag(&self) -> Result<Option<CopyTag>> {
        let entries = self
            .fs
            .list_dir(&self.dest_dir)
            .map_err(|source| Error::ListDir {
                path: self.dest_dir.clone(),
                source,
            })?;

        Ok(entries
            .iter()
            .filter(|entry| !entry.is_dir)
            .filter_map(|entry| TaggedName::parse(&entry.name))
            .map(|tagged| tagged.tag().clone())
            .max())
    }
}

//! Per-pass reports
//!
//! Per-file failures never abort a pass; they are collected here so the host
//! can summarise an iteration in one log line or emit it as JSON.

use serde::{Deserialize, Serialize};

use crate::tag::CopyTag;

/// A file that could not be read, written or removed during a pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    /// Name of the file within its directory
    pub name: String,
    /// Rendered error
    pub error: String,
}

impl FileFailure {
    pub fn new(name: impl Into<String>, error: impl ToString) -> Self {
        Self {
            name: name.into(),
            error: error.to_string(),
        }
    }
}

/// Result of pruning the destination directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneReport {
    /// Stale files that were removed
    pub removed: Vec<String>,
    /// Tagged files at or after the current tag
    pub kept: Vec<String>,
    /// Directories and untagged files left alone
    pub ignored: Vec<String>,
    /// Stale files that could not be removed
    pub failed: Vec<FileFailure>,
}

/// Result of copying the source directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Destination names written in this pass
    pub copied: Vec<String>,
    /// Source subdirectories that were skipped
    pub skipped_dirs: Vec<String>,
    /// Source files that could not be read or written
    pub failed: Vec<FileFailure>,
}

/// What an iteration did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IterationOutcome {
    /// Detector found nothing to do; the filesystem was not touched
    Skipped,
    /// Prune and sync both ran
    Completed { prune: PruneReport, sync: SyncReport },
}

/// Report from one detect-prune-sync iteration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationReport {
    /// Tag issued for this iteration
    pub tag: CopyTag,
    pub outcome: IterationOutcome,
}

impl IterationReport {
    pub fn skipped(tag: CopyTag) -> Self {
        Self {
            tag,
            outcome: IterationOutcome::Skipped,
        }
    }

    pub fn completed(tag: CopyTag, prune: PruneReport, sync: SyncReport) -> Self {
        Self {
            tag,
            outcome: IterationOutcome::Completed { prune, sync },
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, IterationOutcome::Skipped)
    }

    /// Number of per-file failures across prune and sync.
    pub fn failure_count(&self) -> usize {
        match &self.outcome {
            IterationOutcome::Skipped => 0,
            IterationOutcome::Completed { prune, sync } => prune.failed.len() + sync.failed.len(),
        }
    }

    /// One-line human summary.
    pub fn summary(&self) -> String {
        match &self.outcome {
            IterationOutcome::Skipped => format!("[{}] no changes detected", self.tag),
            IterationOutcome::Completed { prune, sync } => format!(
                "[{}] removed {}, copied {}, failed {}",
                self.tag,
                prune.removed.len(),
                sync.copied.len(),
                prune.failed.len() + sync.failed.len()
            ),
        }
    }
}

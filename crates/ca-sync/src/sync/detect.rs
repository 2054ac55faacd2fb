//! Change detection
//!
//! Decides whether a pass is needed by comparing the source directory with
//! the tagged copies in the destination. Only ever reads.

use std::path::Path;

use ca_fs::FileSystem;
use serde::{Deserialize, Serialize};

use crate::name::TaggedName;

/// Why the detector asked for a pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ChangeReason {
    /// Different number of eligible files on each side
    CountMismatch { source: usize, dest: usize },
    /// No tagged copy of a source file
    Missing { name: String },
    /// More than one tagged copy of a source file
    Ambiguous { name: String, copies: usize },
    /// The single tagged copy differs from the source
    ContentChanged { name: String },
}

/// Outcome of a detection run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Detection {
    /// Every source file has exactly one identical tagged copy
    Unchanged,
    /// A pass is needed
    Changed(ChangeReason),
    /// A directory could not be listed; skip this pass
    Unavailable,
}

impl Detection {
    pub fn should_run(&self) -> bool {
        matches!(self, Self::Changed(_))
    }
}

/// An eligible file together with its content.
struct Eligible {
    name: String,
    content: Vec<u8>,
}

/// Compares a source directory with its tagged mirror
pub struct ChangeDetector<'a> {
    fs: &'a dyn FileSystem,
    source_dir: &'a Path,
    dest_dir: &'a Path,
}

impl<'a> ChangeDetector<'a> {
    pub fn new(fs: &'a dyn FileSystem, source_dir: &'a Path, dest_dir: &'a Path) -> Self {
        Self {
            fs,
            source_dir,
            dest_dir,
        }
    }

    /// Run detection.
    ///
    /// Eligible source files are readable non-directories whose names still
    /// fit once tagged (see [`TaggedName::accepts`]). Eligible
    /// destination files are readable non-directories with a tagged name;
    /// anything else in the destination is not ours and is not counted.
    pub fn detect(&self) -> Detection {
        let Some(source) = self.eligible(self.source_dir, |name| {
            let fits = TaggedName::accepts(name);
            if !fits {
                tracing::debug!(file = %name, "Source name can't be tagged, not counted");
            }
            fits
        }) else {
            return Detection::Unavailable;
        };
        let Some(dest) = self.eligible(self.dest_dir, |name| TaggedName::parse(name).is_some())
        else {
            return Detection::Unavailable;
        };

        if source.len() != dest.len() {
            return Detection::Changed(ChangeReason::CountMismatch {
                source: source.len(),
                dest: dest.len(),
            });
        }

        for file in &source {
            let copies: Vec<&Eligible> = dest
                .iter()
                .filter(|candidate| {
                    TaggedName::parse(&candidate.name)
                        .is_some_and(|tagged| tagged.original() == file.name)
                })
                .collect();

            match copies.as_slice() {
                [] => {
                    return Detection::Changed(ChangeReason::Missing {
                        name: file.name.clone(),
                    });
                }
                [copy] => {
                    if copy.content != file.content {
                        return Detection::Changed(ChangeReason::ContentChanged {
                            name: file.name.clone(),
                        });
                    }
                }
                _ => {
                    tracing::info!(
                        file = %file.name,
                        copies = copies.len(),
                        "Expected one tagged copy, re-synchronizing"
                    );
                    return Detection::Changed(ChangeReason::Ambiguous {
                        name: file.name.clone(),
                        copies: copies.len(),
                    });
                }
            }
        }

        Detection::Unchanged
    }

    fn eligible(&self, dir: &Path, accept: impl Fn(&str) -> bool) -> Option<Vec<Eligible>> {
        let entries = match self.fs.list_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "Couldn't list directory");
                return None;
            }
        };

        let files = entries
            .into_iter()
            .filter(|entry| !entry.is_dir && accept(&entry.name))
            .filter_map(|entry| match self.fs.read_file(&dir.join(&entry.name)) {
                Ok(content) => Some(Eligible {
                    name: entry.name,
                    content,
                }),
                Err(e) => {
                    tracing::debug!(file = %entry.name, error = %e, "Unreadable file not counted");
                    None
                }
            })
            .collect();
        Some(files)
    }
}

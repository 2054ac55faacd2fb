//! In-memory filesystem for tests
//!
//! Paths are compared literally; callers are expected to build them with
//! `Path::join` from the same roots they registered with [`MemoryFileSystem::create_dir`].

use std::collections::{BTreeMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{DirEntry, Error, FileSystem, Result};

#[derive(Debug, Clone)]
enum Node {
    File(Vec<u8>),
    Dir,
}

#[derive(Debug, Default)]
struct Faults {
    list: HashSet<PathBuf>,
    read: HashSet<PathBuf>,
    write: HashSet<PathBuf>,
    remove: HashSet<PathBuf>,
}

#[derive(Debug, Default)]
struct State {
    nodes: BTreeMap<PathBuf, Node>,
    faults: Faults,
}

/// A [`FileSystem`] that keeps everything in memory.
///
/// Any operation can be made to fail for a given path, which is how the
/// partial-failure behaviour of the sync core is exercised.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    state: Mutex<State>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create a directory and all of its missing ancestors.
    pub fn create_dir(&self, dir: impl AsRef<Path>) {
        let mut state = self.state();
        for ancestor in dir.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            state.nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
        }
    }

    /// Remove a file or an empty directory without going through fault injection.
    pub fn delete(&self, path: impl AsRef<Path>) -> bool {
        self.state().nodes.remove(path.as_ref()).is_some()
    }

    /// Whether a file exists at `path`.
    pub fn is_file(&self, path: impl AsRef<Path>) -> bool {
        matches!(self.state().nodes.get(path.as_ref()), Some(Node::File(_)))
    }

    /// Content of the file at `path`, bypassing fault injection.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        match self.state().nodes.get(path.as_ref()) {
            Some(Node::File(content)) => Some(content.clone()),
            _ => None,
        }
    }

    /// Names of the direct children of `dir`, sorted.
    pub fn names_in(&self, dir: impl AsRef<Path>) -> Vec<String> {
        children(&self.state(), dir.as_ref())
            .into_iter()
            .map(|entry| entry.name)
            .collect()
    }

    /// Make every `list_dir` of `dir` fail.
    pub fn fail_listing(&self, dir: impl AsRef<Path>) {
        self.state().faults.list.insert(dir.as_ref().to_path_buf());
    }

    /// Make every `read_file` of `path` fail.
    pub fn fail_reads(&self, path: impl AsRef<Path>) {
        self.state().faults.read.insert(path.as_ref().to_path_buf());
    }

    /// Make every `write_file` to `path` fail.
    pub fn fail_writes(&self, path: impl AsRef<Path>) {
        self.state().faults.write.insert(path.as_ref().to_path_buf());
    }

    /// Make every `remove_file` of `path` fail.
    pub fn fail_removals(&self, path: impl AsRef<Path>) {
        self.state().faults.remove.insert(path.as_ref().to_path_buf());
    }

    /// Drop every injected fault.
    pub fn clear_faults(&self) {
        self.state().faults = Faults::default();
    }
}

fn injected(path: &Path) -> Error {
    Error::io(
        path,
        io::Error::new(io::ErrorKind::PermissionDenied, "injected failure"),
    )
}

fn not_found(path: &Path) -> Error {
    Error::io(path, io::Error::from(io::ErrorKind::NotFound))
}

fn children(state: &State, dir: &Path) -> Vec<DirEntry> {
    state
        .nodes
        .iter()
        .filter(|(path, _)| path.parent() == Some(dir))
        .filter_map(|(path, node)| {
            let name = path.file_name()?.to_str()?.to_string();
            Some(DirEntry {
                name,
                is_dir: matches!(node, Node::Dir),
            })
        })
        .collect()
}

impl FileSystem for MemoryFileSystem {
    fn list_dir(&self, dir: &Path) -> Result<Vec<DirEntry>> {
        let state = self.state();
        if state.faults.list.contains(dir) {
            return Err(injected(dir));
        }
        match state.nodes.get(dir) {
            Some(Node::Dir) => Ok(children(&state, dir)),
            Some(Node::File(_)) => Err(Error::io(
                dir,
                io::Error::from(io::ErrorKind::NotADirectory),
            )),
            None => Err(not_found(dir)),
        }
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        let state = self.state();
        if state.faults.read.contains(path) {
            return Err(injected(path));
        }
        match state.nodes.get(path) {
            Some(Node::File(content)) => Ok(content.clone()),
            Some(Node::Dir) => Err(Error::io(
                path,
                io::Error::from(io::ErrorKind::IsADirectory),
            )),
            None => Err(not_found(path)),
        }
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> Result<()> {
        let mut state = self.state();
        if state.faults.write.contains(path) {
            return Err(injected(path));
        }
        let parent_is_dir = path
            .parent()
            .is_some_and(|parent| matches!(state.nodes.get(parent), Some(Node::Dir)));
        if !parent_is_dir {
            return Err(not_found(path));
        }
        if let Some(Node::Dir) = state.nodes.get(path) {
            return Err(Error::io(
                path,
                io::Error::from(io::ErrorKind::IsADirectory),
            ));
        }
        state
            .nodes
            .insert(path.to_path_buf(), Node::File(content.to_vec()));
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        let mut state = self.state();
        if state.faults.remove.contains(path) {
            return Err(injected(path));
        }
        match state.nodes.get(path) {
            Some(Node::File(_)) => {
                state.nodes.remove(path);
                Ok(())
            }
            Some(Node::Dir) => Err(Error::io(
                path,
                io::Error::from(io::ErrorKind::IsADirectory),
            )),
            None => Err(not_found(path)),
        }
    }
}

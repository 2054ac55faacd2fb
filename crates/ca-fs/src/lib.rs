//! Filesystem abstraction for the trust-anchor watcher
//!
//! The sync core only ever lists, reads, writes and removes flat files, so the
//! [`FileSystem`] trait exposes exactly those four operations. Two
//! implementations are provided:
//!
//! - [`OsFileSystem`] for the real filesystem, with atomic replace-on-write
//! - [`MemoryFileSystem`] for tests, with per-path failure injection

pub mod error;
pub mod memory;
pub mod os;

mod entry;

pub use entry::{DirEntry, FileSystem};
pub use error::{Error, Result};
pub use memory::MemoryFileSystem;
pub use os::{OsFileSystem, WriteOptions};

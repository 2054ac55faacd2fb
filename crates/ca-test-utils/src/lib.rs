//! Shared test utilities for the trust-anchor watcher workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`dirs`]: [`TestDirs`](dirs::TestDirs) source/destination directory pair

pub mod dirs;

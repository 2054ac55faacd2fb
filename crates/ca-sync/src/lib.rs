//! Tagged directory mirroring for node-local trust stores
//!
//! This crate keeps a destination directory in step with a source directory of
//! trust-anchor certificates:
//!
//! - **Tags**: every pass gets a fixed-width, digits-only [`CopyTag`]
//! - **Tagged names**: copies are named `<tag><original name>` ([`TaggedName`])
//! - **Detection**: skip passes when every source file already has one
//!   identical tagged copy
//! - **Pruning**: remove copies tagged before the current pass
//! - **Synchronizing**: write every source file under the current tag
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use ca_fs::OsFileSystem;
//! use ca_sync::{TagClock, TrustStoreWatcher};
//!
//! fn example() -> ca_sync::Result<()> {
//!     let watcher = TrustStoreWatcher::new(
//!         "/etc/trusted-ca/source",
//!         "/usr/local/share/ca-certificates",
//!         Arc::new(OsFileSystem::new()),
//!     )?;
//!     let mut clock = TagClock::new();
//!     let report = watcher.run_iteration(&clock.next())?;
//!     println!("{}", report.summary());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod name;
pub mod sync;
pub mod tag;
pub mod watcher;

pub use error::{Error, Result};
pub use name::{MAX_NAME_LEN, TaggedName};
pub use sync::{
    ChangeDetector, ChangeReason, Detection, FileFailure, IterationOutcome, IterationReport,
    PruneReport, Pruner, SyncReport, Synchronizer,
};
pub use tag::{CopyTag, TAG_LEN, TagClock};
pub use watcher::{TrustStoreWatcher, WatcherOptions};

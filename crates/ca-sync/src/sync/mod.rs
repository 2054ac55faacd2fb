//! The three operations of a pass
//!
//! - **detect**: decide whether a pass is needed at all
//! - **prune**: remove copies written under older tags
//! - **copy**: write the source directory under the current tag

mod copy;
mod detect;
mod prune;
mod report;

pub use copy::Synchronizer;
pub use detect::{ChangeDetector, ChangeReason, Detection};
pub use prune::Pruner;
pub use report::{FileFailure, IterationOutcome, IterationReport, PruneReport, SyncReport};

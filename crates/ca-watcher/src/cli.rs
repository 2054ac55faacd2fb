//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;

/// Keep a node-local trust store in step with a source directory of CA certificates
///
/// Every interval the watcher compares the source directory with the tagged
/// copies in the destination. When they differ it removes copies from earlier
/// passes and writes every source file again as `<timestamp><name>`.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "ca-watcher")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the trust-anchor certificates to mirror
    #[arg(long, env = "TRUSTEDCASRCDIR")]
    pub source_dir: Option<PathBuf>,

    /// Directory the tagged copies are written to
    #[arg(long, env = "TRUSTEDCADESTDIR")]
    pub dest_dir: Option<PathBuf>,

    /// Seconds between iterations [default: 5]
    #[arg(long, env = "CA_WATCHER_INTERVAL_SECS")]
    pub interval_secs: Option<u64>,

    /// TOML file with a [watcher] table supplying unset options
    #[arg(short, long, env = "CA_WATCHER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Prune and copy on every iteration, even when nothing changed
    #[arg(long)]
    pub always_sync: bool,

    /// Flush every copy to disk before it replaces the destination name
    #[arg(long)]
    pub fsync: bool,

    /// Run a single iteration and exit
    #[arg(long)]
    pub once: bool,

    /// Print the iteration report as JSON (with --once)
    #[arg(long, requires = "once")]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

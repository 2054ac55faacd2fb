//! Trust store watcher
//!
//! Polls a source directory of CA certificates and mirrors it into a
//! destination directory under timestamp-tagged names.

mod cli;
mod config;
mod daemon;
mod error;
mod logging;

use std::sync::Arc;

use ca_fs::{OsFileSystem, WriteOptions};
use ca_sync::{TagClock, TrustStoreWatcher, WatcherOptions};
use clap::Parser;
use colored::Colorize;

use cli::Cli;
use config::Settings;
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let settings = Settings::resolve(&cli)?;
    tracing::debug!(?settings, "Resolved settings");

    let fs = OsFileSystem::with_options(WriteOptions {
        fsync: settings.fsync,
    });
    let watcher = TrustStoreWatcher::new(&settings.source_dir, &settings.dest_dir, Arc::new(fs))?
        .with_options(WatcherOptions {
            always_sync: settings.always_sync,
        });

    let mut clock = match watcher.newest_dest_tag() {
        Ok(Some(newest)) => {
            tracing::debug!(tag = %newest, "Resuming after newest tag in destination");
            TagClock::resume_after(newest)
        }
        Ok(None) => TagClock::new(),
        Err(e) => {
            tracing::warn!(error = %e, "Couldn't read existing tags, starting a fresh clock");
            TagClock::new()
        }
    };
    let watcher = Arc::new(watcher);

    if cli.once {
        let report = daemon::run_once(watcher, &mut clock).await?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else if report.is_skipped() {
            println!("{} {}", "skipped".yellow(), report.summary());
        } else if report.failure_count() > 0 {
            println!("{} {}", "partial".yellow().bold(), report.summary());
        } else {
            println!("{} {}", "synced".green().bold(), report.summary());
        }
        return Ok(());
    }

    daemon::run_loop(watcher, clock, settings.interval, daemon::shutdown_signal()).await
}

#[cfg(test)]
mod tests {
    use crate::error::CliError;

    #[test]
    fn user_errors_display_their_message() {
        let err = CliError::user("No source directory");
        assert_eq!(err.to_string(), "No source directory");
    }
}

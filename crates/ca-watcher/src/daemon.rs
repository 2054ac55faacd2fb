//! Periodic trigger for watcher iterations
//!
//! Iterations never overlap: each tick's iteration is awaited before the next
//! tick is polled, and missed ticks are delayed rather than bunched up.
//! Shutdown is only observed between iterations.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use ca_sync::{IterationReport, TagClock, TrustStoreWatcher};
use tokio::time::MissedTickBehavior;

use crate::error::Result;

/// Run one iteration on the blocking pool.
pub async fn run_once(watcher: Arc<TrustStoreWatcher>, clock: &mut TagClock) -> Result<IterationReport> {
    let tag = clock.next();
    let report = tokio::task::spawn_blocking(move || watcher.run_iteration(&tag)).await??;
    Ok(report)
}

/// Run iterations every `period` until `shutdown` resolves.
///
/// A failed iteration is logged and retried from scratch on the next tick.
pub async fn run_loop<F>(
    watcher: Arc<TrustStoreWatcher>,
    mut clock: TagClock,
    period: Duration,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()>,
{
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    tracing::info!(
        source = %watcher.source_dir().display(),
        dest = %watcher.dest_dir().display(),
        "Starting trust store watcher (interval: {:?})",
        period
    );

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Shutdown requested, stopping watcher");
                return Ok(());
            }
            _ = ticker.tick() => {
                match run_once(Arc::clone(&watcher), &mut clock).await {
                    Ok(report) if report.is_skipped() => {
                        tracing::debug!(tag = %report.tag, "No changes detected");
                    }
                    Ok(_) => {}
                    Err(crate::error::CliError::Sync(e)) => {
                        tracing::error!(error = %e, "Iteration failed, retrying on next tick");
                    }
                    Err(e) => return Err(e),
                }
            }
        }
    }
}

/// Resolves on Ctrl-C or, on unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Couldn't listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Couldn't listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

//! Periodic automatic rotation sweep.
//!
//! When enabled via `AUTO_ROTATION_ENABLED`, the server runs the bulk
//! rotation sweep on a fixed interval. Each tick re-evaluates eligibility
//! per assignment, so a tick that fires early is a no-op for employees whose
//! weekly interval has not elapsed yet.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use schichtplan_db::DbPool;
use schichtplan_events::EventBus;
use schichtplan_worker::run_sweep;

/// Run the auto-rotation loop until the cancellation token fires.
///
/// The first tick of `tokio::time::interval` completes immediately, which
/// gives one sweep at startup and then one per interval.
pub async fn run(
    pool: DbPool,
    bus: std::sync::Arc<EventBus>,
    interval_secs: u64,
    shutdown: CancellationToken,
) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    tracing::info!(interval_secs, "Auto-rotation sweep enabled");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match run_sweep(&pool, &bus, None).await {
                    Ok(report) => {
                        if report.total_due > 0 {
                            tracing::info!(
                                total_due = report.total_due,
                                rotated = report.rotated,
                                failed = report.failed,
                                "Auto-rotation sweep finished"
                            );
                        } else {
                            tracing::debug!("Auto-rotation sweep: nothing due");
                        }
                    }
                    Err(e) => {
                        // Keep the loop alive; the next tick retries.
                        tracing::error!(error = %e, "Auto-rotation sweep failed");
                    }
                }
            }
            _ = shutdown.cancelled() => {
                tracing::info!("Auto-rotation task shutting down");
                break;
            }
        }
    }
}

//! Standalone sweep runner.
//!
//! Runs one bulk rotation sweep and exits. Intended for cron or a systemd
//! timer when the in-server auto-rotation task is disabled.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use schichtplan_events::{EventBus, EventPersistence};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "schichtplan_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = schichtplan_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");

    schichtplan_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    let event_bus = Arc::new(EventBus::default());
    let persistence_handle = tokio::spawn(EventPersistence::run(
        pool.clone(),
        event_bus.subscribe(),
    ));

    match schichtplan_worker::run_sweep(&pool, &event_bus, None).await {
        Ok(report) => {
            tracing::info!(
                total_due = report.total_due,
                rotated = report.rotated,
                failed = report.failed,
                "Sweep finished"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Sweep aborted");
        }
    }

    // Close the bus so event persistence drains and shuts down.
    drop(event_bus);
    let _ = persistence_handle.await;
}

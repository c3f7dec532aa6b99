//! # Tasklane API Server
//!
//! This is the main API server for Tasklane, a task tracking service with
//! JWT-authenticated CRUD endpoints and a Prometheus exporter.
//!
//! ## Architecture
//!
//! The API server is built with Axum and provides:
//! - Authentication endpoints (register, login)
//! - Task lifecycle endpoints (create, read, update, soft-delete, list)
//! - User read endpoints
//! - `/metrics` exposition of live-task aggregates and request counters
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p tasklane-api
//! ```

use std::sync::Arc;

use tasklane_api::{
    app::{build_router, AppState},
    config::Config,
};
use tasklane_shared::{
    db::{
        migrations::{ensure_database_exists, run_migrations},
        pool::{create_pool, DatabaseConfig},
        seed::seed_demo_data,
    },
    repo::PgRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config first: it decides the log format
    let config = Config::from_env()?;

    init_tracing(config.log_json);

    tracing::info!(
        "Tasklane API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    ensure_database_exists(&config.database.url).await?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    let repo = Arc::new(PgRepository::new(pool));

    if config.seed_demo_data {
        seed_demo_data(repo.as_ref(), repo.as_ref()).await?;
    }

    let bind_address = config.bind_address();
    let state = AppState::new(repo.clone(), repo, config)?;

    // Prime the gauge so scrapes before the first mutation see current data
    state.tasks.recompute_metrics().await;

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Initializes the tracing subscriber
///
/// `RUST_LOG` overrides the default filter. JSON output is for deployments
/// that ship logs to a collector.
fn init_tracing(log_json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "tasklane_api=debug,tasklane_shared=debug,tower_http=debug".into()
    });

    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Resolves when the process receives a shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler the process only stops by kill
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, exiting...");
}

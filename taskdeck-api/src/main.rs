//! # Taskdeck API Server
//!
//! REST backend for the multi-user todo manager: JWT-authenticated task
//! CRUD over PostgreSQL.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p taskdeck-api
//! ```

use taskdeck_api::app::{build_router, AppState};
use taskdeck_api::config::Config;
use taskdeck_shared::db::{migrations, pool};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskdeck_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Taskdeck API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    // Misconfigured secret is an operational warning, not a blocker
    if config.jwt.secret_is_placeholder() {
        tracing::warn!(
            "JWT_SECRET is unset or still the placeholder value; tokens are forgeable. \
             Set JWT_SECRET before exposing this server."
        );
    }

    if config.jwt.algorithm != "HS256" {
        tracing::warn!(
            algorithm = %config.jwt.algorithm,
            "Unsupported JWT_ALGORITHM; falling back to HS256"
        );
    }

    // Lazy pool: an unreachable database degrades /health instead of
    // aborting startup
    let db = pool::create_pool(pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })?;

    if let Err(e) = migrations::run_migrations(&db).await {
        tracing::warn!("Could not run migrations (database unreachable?): {}", e);
    }

    let bind_address = config.bind_address();
    let state = AppState::new(db.clone(), config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool::close_pool(db).await;
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install ctrl-c handler");
    tracing::info!("Shutdown signal received");
}

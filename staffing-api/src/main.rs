/// # Staffing API Server
///
/// JSON API for the staffing job board: job postings, applications,
/// candidate and employer profiles, notifications and admin reporting.
///
/// Runs without a database (demo data) and without email credentials
/// (emails are logged). Auth must be configured for protected endpoints.
///
/// ## Usage
///
/// ```bash
/// cargo run -p staffing-api
/// ```

use staffing_api::{
    app::{build_router, AppState},
    config::Config,
};
use staffing_shared::db::{migrations::run_migrations, pool::close_pool};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "staffing_api=debug,staffing_shared=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Staffing API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    let address = config.bind_address();
    let state = AppState::from_config(config)?;

    match state.source.pool() {
        Some(pool) => {
            if let Err(e) = run_migrations(pool).await {
                tracing::warn!(error = %e, "Migrations failed, requests will fall back to demo data");
            }
        }
        None => tracing::info!("No database configured, serving demo data"),
    }
    if state.sessions.is_none() {
        tracing::warn!("Auth is not configured, protected endpoints will answer 401");
    }

    let source = state.source.clone();
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = source.pool() {
        close_pool(pool).await;
    }
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received, draining connections...");
}

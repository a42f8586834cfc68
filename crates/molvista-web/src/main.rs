//! Molvista Web Server
//!
//! Run with: cargo run -p molvista-web

use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Molvista Web Server...");

    // Create app state (embedded compound registry)
    let state = molvista_web::state::AppState::new()?;
    info!(compounds = state.registry.len(), "compound registry loaded");

    // Build router
    let app = molvista_web::router::build_router(state);

    // Bind and serve
    let addr = molvista_web::config::bind_addr()?;
    info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

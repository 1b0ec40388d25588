//! Serve the evaluation API on `BIND_ADDR` (default 127.0.0.1:8000) without Shuttle.

use anyhow::Context;
use book_decision_companion::config::ServiceConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    book_decision_companion::logging::init_tracing();

    let config = ServiceConfig::load()?;
    let addr = config.bind_addr.clone();
    let app = book_decision_companion::app_with_config(config)?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("server error")?;
    Ok(())
}

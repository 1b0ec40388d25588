//! Book Decision Companion — Binary Entrypoint
//! Boots the Axum HTTP server on Shuttle. For a plain local listener use
//! the `local_server` binary.

use shuttle_axum::ShuttleAxum;

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    book_decision_companion::logging::init_tracing();

    let router = book_decision_companion::app()
        .await
        .map_err(shuttle_runtime::Error::Custom)?;

    Ok(router.into())
}

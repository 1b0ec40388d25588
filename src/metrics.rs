//! Prometheus exposition for the evaluation endpoint.

use std::time::Duration;

use anyhow::{anyhow, Result};
use axum::{routing::get, Router};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

pub const ENV_METRICS_ROUTES: &str = "METRICS_ROUTES";

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the global recorder once per process; later calls reuse it.
    pub fn init() -> Result<Self> {
        let handle = HANDLE
            .get_or_try_init(|| {
                PrometheusBuilder::new()
                    .install_recorder()
                    .map_err(|e| anyhow!("prometheus: install recorder: {e}"))
            })?
            .clone();
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

/// `METRICS_ROUTES=1` mounts `/metrics`.
pub fn routes_enabled() -> bool {
    std::env::var(ENV_METRICS_ROUTES).ok().as_deref() == Some("1")
}

pub fn record_success(books: usize, elapsed: Duration) {
    counter!("book_eval_requests_total").increment(1);
    histogram!("book_eval_books").record(books as f64);
    histogram!("book_eval_duration_ms").record(elapsed.as_secs_f64() * 1_000.0);
}

pub fn record_failure(kind: &'static str) {
    counter!("book_eval_requests_total").increment(1);
    counter!("book_eval_failures_total", "kind" => kind).increment(1);
}

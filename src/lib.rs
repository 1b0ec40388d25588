// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod api;
pub mod builder;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod logging;
pub mod metrics;
pub mod model;

// ---- Re-exports for stable public API ----
pub use crate::api::router;
pub use crate::builder::EvaluationBuilder;
pub use crate::error::EvalError;
pub use crate::evaluator::{evaluate, evaluate_with_policy, CoveragePolicy, ScoringPolicy};
pub use crate::model::{Book, CriterionWeightSet, EvaluationRequest, RankedEntry};

use axum::Router;
use tracing::info;

/// Full application router: config from file/env, plus `/metrics` when
/// `METRICS_ROUTES=1`.
pub async fn app() -> anyhow::Result<Router> {
    let config = config::ServiceConfig::load()?;
    app_with_config(config)
}

/// Same as [`app`] for an already loaded config.
pub fn app_with_config(config: config::ServiceConfig) -> anyhow::Result<Router> {
    info!(
        strict = config.strict_criteria,
        precision = ?config.score_precision,
        timeout_ms = config.request_timeout_ms,
        extra_origins = config.extra_origins.len(),
        "service config loaded"
    );

    let mut router = api::router(config);
    if metrics::routes_enabled() {
        let m = metrics::Metrics::init()?;
        router = router.merge(m.router());
    }
    Ok(router)
}

//! HTTP surface: wire payloads, the `/evaluate` handler and the router.
//!
//! Request JSON is decoded straight into typed payloads and converted once
//! into an [`EvaluationRequest`]; nothing past this module sees raw JSON.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::config::{build_allowed_origins, ServiceConfig};
use crate::error::EvalError;
use crate::evaluator::evaluate_request;
use crate::metrics;
use crate::model::{Book, CriterionWeightSet, EvaluationRequest, RankedEntry};

#[derive(Clone)]
pub struct AppState {
    config: Arc<ServiceConfig>,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookPayload {
    pub name: String,
    #[serde(default)]
    pub ratings: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvaluatePayload {
    pub books: Vec<BookPayload>,
    pub weights: BTreeMap<String, f64>,
}

impl From<EvaluatePayload> for EvaluationRequest {
    fn from(p: EvaluatePayload) -> Self {
        let books = p
            .books
            .into_iter()
            .map(|b| Book {
                name: b.name,
                ratings: b.ratings,
            })
            .collect();
        let weights: CriterionWeightSet = p.weights.into_iter().collect();
        EvaluationRequest::new(books, weights)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateResponse {
    pub ranked_books: Vec<RankedEntry>,
}

/// Everything `/evaluate` can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Evaluation(#[from] EvalError),
    /// Body could not be read or decoded.
    #[error("{0}")]
    Transport(String),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Evaluation(e) => e.kind(),
            Self::Transport(_) => "transport_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Evaluation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Transport(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(r: JsonRejection) -> Self {
        Self::Transport(r.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "detail": self.to_string(),
            "kind": self.kind(),
        }));
        (self.status(), body).into_response()
    }
}

/// Build the router without metrics (tests and embedding).
pub fn router(config: ServiceConfig) -> Router {
    let cors = cors_layer(&config);
    let timeout = config.request_timeout();

    Router::new()
        .route("/", get(root))
        .route("/health", get(|| async { "ok" }))
        .route("/evaluate", post(evaluate_books))
        .with_state(AppState::new(config))
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &ServiceConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = build_allowed_origins(&config.extra_origins)
        .into_iter()
        .filter_map(|o| match HeaderValue::from_str(&o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "skipping invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Book Decision Companion API is running.",
    }))
}

async fn evaluate_books(
    State(state): State<AppState>,
    payload: Result<Json<EvaluatePayload>, JsonRejection>,
) -> Result<Json<EvaluateResponse>, ApiError> {
    let started = Instant::now();

    let result = payload
        .map_err(ApiError::from)
        .and_then(|Json(p)| {
            let req = EvaluationRequest::from(p);
            let ranked = evaluate_request(&req, state.config().scoring_policy())?;
            Ok((req.books.len(), req.weights.len(), ranked))
        });

    match result {
        Ok((books, criteria, ranked)) => {
            metrics::record_success(books, started.elapsed());
            info!(books, criteria, "evaluation served");
            Ok(Json(EvaluateResponse {
                ranked_books: present(ranked, state.config().score_precision),
            }))
        }
        Err(e) => {
            metrics::record_failure(e.kind());
            warn!(kind = e.kind(), error = %e, "evaluation rejected");
            Err(e)
        }
    }
}

/// Presentation rounding. Runs after sorting, so order is untouched.
fn present(ranked: Vec<RankedEntry>, precision: Option<u32>) -> Vec<RankedEntry> {
    let Some(p) = precision else {
        return ranked;
    };
    let factor = 10f64.powi(p as i32);
    ranked
        .into_iter()
        .map(|r| {
            // Scores near f64::MAX would overflow when scaled; keep them as-is
            let scaled = r.score * factor;
            if scaled.is_finite() {
                RankedEntry::new(r.name, scaled.round() / factor)
            } else {
                r
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_converts_to_typed_request() {
        let p: EvaluatePayload = serde_json::from_value(json!({
            "books": [{ "name": "A", "ratings": { "Depth": 4 } }],
            "weights": { "Depth": 5, "Readability": 3 }
        }))
        .unwrap();
        let req = EvaluationRequest::from(p);
        assert_eq!(req.books.len(), 1);
        assert_eq!(req.books[0].rating("Depth"), Some(4.0));
        assert_eq!(req.weights.get("Readability"), Some(3.0));
    }

    #[test]
    fn present_rounds_without_reordering() {
        let ranked = vec![RankedEntry::new("A", 10.006), RankedEntry::new("B", 10.004)];
        let out = present(ranked, Some(2));
        assert_eq!(out[0], RankedEntry::new("A", 10.01));
        assert_eq!(out[1], RankedEntry::new("B", 10.0));
    }

    #[test]
    fn present_keeps_scores_that_would_overflow_when_scaled() {
        let ranked = vec![RankedEntry::new("A", 1e308), RankedEntry::new("B", 1.005e3)];
        let out = present(ranked, Some(12));
        assert_eq!(out[0], RankedEntry::new("A", 1e308));
        assert!(out.iter().all(|r| r.score.is_finite()));
    }

    #[test]
    fn present_passthrough_without_precision() {
        let ranked = vec![RankedEntry::new("A", 1.0 / 3.0)];
        assert_eq!(present(ranked.clone(), None), ranked);
    }

    #[test]
    fn error_kinds_and_statuses() {
        let e = ApiError::from(EvalError::no_books());
        assert_eq!(e.kind(), "empty_input");
        assert_eq!(e.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(e.to_string(), "At least one book is required.");

        let t = ApiError::Transport("bad json".into());
        assert_eq!(t.kind(), "transport_error");
        assert_eq!(t.status(), StatusCode::BAD_REQUEST);
    }
}

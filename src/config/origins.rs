// src/config/origins.rs
//! CORS origin list: local dev frontends plus whatever the deployment adds.

use std::collections::HashSet;

/// Vite dev server ports used by the frontend.
pub const DEFAULT_ORIGINS: [&str; 4] = [
    "http://localhost:5173",
    "http://127.0.0.1:5173",
    "http://localhost:5174",
    "http://127.0.0.1:5174",
];

/// Defaults first, then `extra`, de-duplicated keeping the first occurrence.
pub fn build_allowed_origins(extra: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    DEFAULT_ORIGINS
        .iter()
        .map(|s| s.to_string())
        .chain(extra.iter().map(|s| s.trim().to_string()))
        .filter(|o| !o.is_empty())
        .filter(|o| seen.insert(o.clone()))
        .collect()
}

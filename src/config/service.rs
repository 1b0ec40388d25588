// src/config/service.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::warn;

use crate::evaluator::{CoveragePolicy, ScoringPolicy};

pub const DEFAULT_SERVICE_CONFIG_PATH: &str = "config/service.toml";
pub const ENV_SERVICE_CONFIG_PATH: &str = "SERVICE_CONFIG_PATH";

pub const ENV_ALLOWED_ORIGINS: &str = "ALLOWED_ORIGINS";
pub const ENV_SCORE_PRECISION: &str = "SCORE_PRECISION";
pub const ENV_STRICT_CRITERIA: &str = "STRICT_CRITERIA";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "REQUEST_TIMEOUT_MS";
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";

const MAX_SCORE_PRECISION: u32 = 12;

fn default_request_timeout_ms() -> u64 {
    5_000
}
fn default_bind_addr() -> String {
    "127.0.0.1:8000".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Decimal places for scores in responses. `None` = full precision.
    #[serde(default)]
    pub score_precision: Option<u32>,
    /// Require every book to rate exactly the weighted criteria.
    #[serde(default)]
    pub strict_criteria: bool,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Only used by the local server binary; Shuttle binds on its own.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Appended to the built-in development origins.
    #[serde(default)]
    pub extra_origins: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            score_precision: None,
            strict_criteria: false,
            request_timeout_ms: default_request_timeout_ms(),
            bind_addr: default_bind_addr(),
            extra_origins: Vec::new(),
        }
    }
}

impl ServiceConfig {
    /// Parse a TOML file. Missing keys fall back to defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading service config from {}", path.display()))?;
        let cfg: ServiceConfig = toml::from_str(&data)
            .with_context(|| format!("parsing service config {}", path.display()))?;
        Ok(cfg.sanitized())
    }

    /// Defaults → file → env.
    ///
    /// File lookup:
    /// 1) $SERVICE_CONFIG_PATH (must exist)
    /// 2) config/service.toml (optional)
    pub fn load() -> Result<Self> {
        let base = match env::var(ENV_SERVICE_CONFIG_PATH) {
            Ok(p) => Self::load_from_file(PathBuf::from(p))?,
            Err(_) => {
                let p = PathBuf::from(DEFAULT_SERVICE_CONFIG_PATH);
                if p.exists() {
                    Self::load_from_file(&p)?
                } else {
                    Self::default()
                }
            }
        };
        Ok(base.with_env_overrides())
    }

    /// Apply env overrides. Unparsable values are ignored with a warning.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(p) = parse_env::<u32>(ENV_SCORE_PRECISION) {
            self.score_precision = Some(p);
        }
        if let Ok(raw) = env::var(ENV_STRICT_CRITERIA) {
            match parse_bool(&raw) {
                Some(b) => self.strict_criteria = b,
                None => warn!(var = ENV_STRICT_CRITERIA, value = %raw, "ignoring non-boolean env value"),
            }
        }
        if let Some(ms) = parse_env::<u64>(ENV_REQUEST_TIMEOUT_MS) {
            self.request_timeout_ms = ms;
        }
        if let Ok(addr) = env::var(ENV_BIND_ADDR) {
            if !addr.trim().is_empty() {
                self.bind_addr = addr.trim().to_string();
            }
        }
        if let Ok(raw) = env::var(ENV_ALLOWED_ORIGINS) {
            self.extra_origins.extend(split_origins(&raw));
        }
        self.sanitized()
    }

    pub fn scoring_policy(&self) -> ScoringPolicy {
        ScoringPolicy {
            coverage: if self.strict_criteria {
                CoveragePolicy::Strict
            } else {
                CoveragePolicy::Lenient
            },
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    fn sanitized(mut self) -> Self {
        if let Some(p) = self.score_precision {
            self.score_precision = Some(p.min(MAX_SCORE_PRECISION));
        }
        if self.request_timeout_ms == 0 {
            self.request_timeout_ms = default_request_timeout_ms();
        }
        self
    }
}

/// Split a comma-separated origin list, dropping blanks.
pub(crate) fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_env<T: std::str::FromStr>(var: &str) -> Option<T> {
    let raw = env::var(var).ok()?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(var, value = %raw, "ignoring unparsable env value");
            None
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

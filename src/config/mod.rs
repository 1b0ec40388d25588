// src/config/mod.rs
pub mod origins;
pub mod service;

pub use origins::{build_allowed_origins, DEFAULT_ORIGINS};
pub use service::ServiceConfig;

//! Honeypot Gateway
//!
//! This crate implements the HTTP boundary around the engagement engine:
//! - API key authentication
//! - Request validation and error mapping
//! - Routing for the honeypot, health and metrics endpoints
//! - Prometheus metrics

pub mod auth;
pub mod config;
pub mod error;
pub mod metrics;
pub mod router;
pub mod state;

pub use auth::{ApiKey, ApiKeyAuth, AuthError, API_KEY_HEADER};
pub use config::{ConfigError, GatewayConfig};
pub use error::ApiError;
pub use router::build_routes;
pub use state::AppState;

/// Gateway version
pub const GATEWAY_VERSION: &str = env!("CARGO_PKG_VERSION");

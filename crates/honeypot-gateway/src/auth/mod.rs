//! Authentication module for Honeypot Gateway
//!
//! Callers present a shared secret in the `x-api-key` header. A mismatch is
//! rejected before the engagement engine runs, so it never changes
//! conversation state.

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use subtle::ConstantTimeEq;

use crate::metrics;

/// Header carrying the shared secret
pub const API_KEY_HEADER: &str = "x-api-key";

/// Authentication error
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing API key header")]
    MissingKey,
    #[error("Invalid API key")]
    InvalidKey,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        metrics::AUTH_FAILURES.inc();
        tracing::warn!(reason = %self, "rejected unauthenticated request");
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Invalid API Key" })),
        )
            .into_response()
    }
}

/// Process-configured shared secret
#[derive(Clone)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    /// Constant-time comparison against the configured key
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.as_bytes().ct_eq(candidate.as_bytes()).into()
    }

    pub fn verify(&self, presented: Option<&str>) -> Result<(), AuthError> {
        match presented {
            None => Err(AuthError::MissingKey),
            Some(key) if self.matches(key) => Ok(()),
            Some(_) => Err(AuthError::InvalidKey),
        }
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Marker extractor: present in a handler's arguments means the request
/// carried the configured API key.
#[derive(Debug, Clone, Copy)]
pub struct ApiKeyAuth;

#[async_trait::async_trait]
impl<S> FromRequestParts<S> for ApiKeyAuth
where
    ApiKey: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let expected = ApiKey::from_ref(state);
        let presented = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok());

        expected.verify(presented).map(|()| ApiKeyAuth)
    }
}

//! Shared handler state

use std::sync::Arc;

use axum::extract::FromRef;
use honeypot_context::EngagementEngine;

use crate::auth::ApiKey;

/// State injected into every handler. The engine, and the conversation store
/// it owns, live as long as the process.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<EngagementEngine>,
    pub api_key: ApiKey,
}

impl AppState {
    pub fn new(engine: EngagementEngine, api_key: ApiKey) -> Self {
        Self {
            engine: Arc::new(engine),
            api_key,
        }
    }
}

impl FromRef<AppState> for ApiKey {
    fn from_ref(state: &AppState) -> Self {
        state.api_key.clone()
    }
}

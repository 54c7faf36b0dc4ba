//! Request routing for Honeypot Gateway

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::get,
    Json, Router,
};
use honeypot_protocol::{
    ConversationTranscript, EngagementRequest, EngagementResponse, ServiceStatus,
};

use crate::auth::ApiKeyAuth;
use crate::error::ApiError;
use crate::metrics;
use crate::state::AppState;

/// Build the main router for the gateway
pub fn build_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/honeypot", get(honeypot_status).post(engage))
        .route(
            "/honeypot/conversations/:conversation_id",
            get(conversation_history),
        )
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

async fn metrics_handler() -> String {
    metrics::export()
}

async fn honeypot_status() -> Json<ServiceStatus> {
    Json(ServiceStatus::default())
}

/// Handle one scammer message
async fn engage(
    State(state): State<AppState>,
    _auth: ApiKeyAuth,
    payload: Result<Json<EngagementRequest>, JsonRejection>,
) -> Result<Json<EngagementResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    tracing::info!(
        conversation_id = %request.conversation_id,
        message_len = request.message.len(),
        "message received"
    );

    let timer = metrics::ENGAGEMENT_LATENCY.start_timer();
    let response = state
        .engine
        .handle(&request.conversation_id, request.message)
        .await?;
    timer.observe_duration();

    metrics::record_engagement(&response);
    metrics::CONVERSATIONS_TRACKED.set(state.engine.store().conversation_count().await as f64);

    if response.scam_detected {
        tracing::info!(
            conversation_id = %response.conversation_id,
            scam_type = %response.scam_type,
            turns = response.engagement.turns,
            "scam engagement active"
        );
    }

    Ok(Json(response))
}

async fn conversation_history(
    State(state): State<AppState>,
    _auth: ApiKeyAuth,
    Path(conversation_id): Path<String>,
) -> Result<Json<ConversationTranscript>, ApiError> {
    let transcript = state.engine.transcript(&conversation_id).await?;
    Ok(Json(transcript))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{ApiKey, API_KEY_HEADER};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use honeypot_context::{EngagementEngine, InMemoryConversationStore};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    const KEY: &str = "test-key";

    fn app() -> Router {
        let engine = EngagementEngine::new(Arc::new(InMemoryConversationStore::new()));
        build_routes(AppState::new(engine, ApiKey::new(KEY)))
    }

    fn post_message(key: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/honeypot")
            .header("content-type", "application/json");
        if let Some(key) = key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_check_returns_ok() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn status_endpoint_needs_no_key() {
        let response = app()
            .oneshot(Request::builder().uri("/honeypot").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(
            body["status"],
            "Honeypot API is live. Use POST /honeypot to send messages."
        );
    }

    #[tokio::test]
    async fn engage_returns_bank_fraud_response() {
        let response = app()
            .oneshot(post_message(
                Some(KEY),
                serde_json::json!({
                    "conversation_id": "c1",
                    "message": "please share your bank account number",
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["conversation_id"], "c1");
        assert_eq!(body["scam_detected"], true);
        assert_eq!(body["scam_type"], "BANK_FRAUD");
        assert_eq!(body["persona"], "confused_salaried_user");
        assert_eq!(body["engagement"]["turns"], 1);
        assert_eq!(body["engagement"]["status"], "active");
        assert!(body["reply_to_scammer"].is_string());
    }

    #[tokio::test]
    async fn wrong_key_is_rejected_without_state_change() {
        let app = app();

        let rejected = app
            .clone()
            .oneshot(post_message(
                Some("wrong"),
                serde_json::json!({"conversation_id": "c1", "message": "bank"}),
            ))
            .await
            .unwrap();
        assert_eq!(rejected.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(rejected).await["detail"], "Invalid API Key");

        let missing = app
            .clone()
            .oneshot(post_message(
                None,
                serde_json::json!({"conversation_id": "c1", "message": "bank"}),
            ))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

        let accepted = app
            .oneshot(post_message(
                Some(KEY),
                serde_json::json!({"conversation_id": "c1", "message": "hello"}),
            ))
            .await
            .unwrap();
        let body = json_body(accepted).await;
        assert_eq!(body["engagement"]["turns"], 1);
        assert_eq!(body["scam_type"], "UNKNOWN");
    }

    #[tokio::test]
    async fn empty_message_is_unprocessable() {
        let response = app()
            .oneshot(post_message(
                Some(KEY),
                serde_json::json!({"conversation_id": "c1", "message": ""}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["detail"], "message cannot be empty");
    }

    #[tokio::test]
    async fn whitespace_message_counts_as_a_turn() {
        let response = app()
            .oneshot(post_message(
                Some(KEY),
                serde_json::json!({"conversation_id": "c1", "message": "   "}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["engagement"]["turns"], 1);
        assert_eq!(body["scam_type"], "UNKNOWN");
    }

    #[tokio::test]
    async fn missing_field_is_rejected() {
        let response = app()
            .oneshot(post_message(
                Some(KEY),
                serde_json::json!({"conversation_id": "c1"}),
            ))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
        assert!(json_body(response).await["detail"].is_string());
    }

    #[tokio::test]
    async fn history_requires_key_and_known_id() {
        let app = app();

        let unknown = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/honeypot/conversations/nope")
                    .header(API_KEY_HEADER, KEY)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

        let unauthorized = app
            .oneshot(
                Request::builder()
                    .uri("/honeypot/conversations/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn metrics_endpoint_exposes_text_format() {
        let response = app()
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}

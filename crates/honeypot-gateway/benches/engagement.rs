use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use honeypot_context::{EngagementEngine, InMemoryConversationStore};
use honeypot_gateway::{build_routes, ApiKey, AppState, API_KEY_HEADER};
use tower::ServiceExt;

const KEY: &str = "bench-key";

fn engage_request(conversation_id: &str, index: usize) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/honeypot")
        .header("content-type", "application/json")
        .header(API_KEY_HEADER, KEY)
        .body(Body::from(
            serde_json::json!({
                "conversation_id": conversation_id,
                "message": format!("verify account 1234567890{index:02} at https://x.test/{index}"),
            })
            .to_string(),
        ))
        .expect("engage request should build")
}

fn benchmark_engagement_latency(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime should build");

    let mut group = c.benchmark_group("engagement");
    group.throughput(Throughput::Elements(1));

    // the whole transcript is rescanned each turn, so cost grows with history
    for depth in [1usize, 10, 50] {
        group.bench_with_input(BenchmarkId::new("post_honeypot", depth), &depth, |b, &depth| {
            let engine = EngagementEngine::new(Arc::new(InMemoryConversationStore::new()));
            let app = build_routes(AppState::new(engine, ApiKey::new(KEY)));

            runtime.block_on(async {
                for i in 0..depth {
                    let response = app
                        .clone()
                        .oneshot(engage_request("warm", i))
                        .await
                        .expect("warmup request should succeed");
                    assert_eq!(response.status(), StatusCode::OK);
                }
            });

            let mut index = depth;
            b.iter(|| {
                index += 1;
                runtime.block_on(async {
                    let response = app
                        .clone()
                        .oneshot(engage_request("warm", index % 100))
                        .await
                        .expect("engage request should succeed");
                    assert_eq!(response.status(), StatusCode::OK);
                });
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_engagement_latency);
criterion_main!(benches);

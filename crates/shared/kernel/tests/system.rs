use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use persona_kernel::server::router::system_router;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn get(uri: &str) -> axum::response::Response {
    let (router, _) = system_router::<()>().split_for_parts();
    router.oneshot(Request::get(uri).body(Body::empty()).unwrap()).await.expect("infallible")
}

#[tokio::test]
async fn home_returns_static_greeting() {
    let response = get("/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let body: Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(body, json!({ "Hello": "World" }));
}

#[tokio::test]
async fn health_reports_up_without_caching() {
    let response = get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).and_then(|v| v.to_str().ok()),
        Some("no-store, no-cache, must-revalidate")
    );

    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let body: Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(body["status"], "up");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn system_routes_are_documented() {
    let (_, api) = system_router::<()>().split_for_parts();
    assert!(api.paths.paths.contains_key("/"));
    assert!(api.paths.paths.contains_key("/health"));
}

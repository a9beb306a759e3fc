use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use daily_sentence::auth::{CredentialExchanger, HmacCredentialExchanger, OPEN_ID_HEADER};
use daily_sentence::db::DatabaseProxy;

pub const TEST_SECRET: &str = "test-secret";

pub async fn create_test_app() -> Router {
    let proxy = DatabaseProxy::connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    let exchanger: Arc<dyn CredentialExchanger> =
        Arc::new(HmacCredentialExchanger::new(TEST_SECRET));

    daily_sentence::create_app_with(Some(proxy), exchanger)
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn get_as(app: &Router, uri: &str, openid: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header(OPEN_ID_HEADER, openid)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn post_json(app: &Router, uri: &str, payload: &serde_json::Value) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn post_json_as(
    app: &Router,
    uri: &str,
    openid: &str,
    payload: &serde_json::Value,
) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .header(OPEN_ID_HEADER, openid)
                .body(Body::from(serde_json::to_vec(payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

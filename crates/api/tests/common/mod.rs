#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use reqfields_api::config::ServerConfig;
use reqfields_api::router::build_app_router;
use reqfields_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and no required fields.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        public_post_types: vec!["post".into(), "page".into(), "attachment".into()],
        required_fields: Vec::new(),
    }
}

/// Build the full application router with every middleware layer.
pub fn build_test_app() -> Router {
    build_test_app_with(test_config())
}

/// Same as [`build_test_app`] with a caller-supplied config.
pub fn build_test_app_with(config: ServerConfig) -> Router {
    let state = AppState::new(config.clone());
    build_app_router(state, &config)
}

/// Build the router with `REQUIRED_FIELDS` set to `fields`.
pub fn build_test_app_requiring(fields: &[&str]) -> Router {
    let mut config = test_config();
    config.required_fields = fields.iter().map(|f| f.to_string()).collect();
    build_test_app_with(config)
}

/// Role used by the `*_as` helpers when none is given.
pub const ADMIN: (i64, &str) = (1, "administrator");

fn request(method: Method, uri: &str, user: Option<(i64, &str)>, body: Option<&Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((user_id, role)) = user {
        builder = builder
            .header("x-user-id", user_id.to_string())
            .header("x-user-role", role);
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Anonymous GET.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(request(Method::GET, uri, None, None))
        .await
        .unwrap()
}

/// GET on behalf of `(user_id, role)`.
pub async fn get_as(app: Router, uri: &str, user: (i64, &str)) -> Response<Body> {
    app.oneshot(request(Method::GET, uri, Some(user), None))
        .await
        .unwrap()
}

/// POST a JSON body on behalf of `(user_id, role)`.
pub async fn post_json(app: Router, uri: &str, user: (i64, &str), body: Value) -> Response<Body> {
    app.oneshot(request(Method::POST, uri, Some(user), Some(&body)))
        .await
        .unwrap()
}

/// POST a JSON body without user headers.
pub async fn post_json_anonymous(app: Router, uri: &str, body: Value) -> Response<Body> {
    app.oneshot(request(Method::POST, uri, None, Some(&body)))
        .await
        .unwrap()
}

/// PUT a JSON body on behalf of `(user_id, role)`.
pub async fn put_json(app: Router, uri: &str, user: (i64, &str), body: Value) -> Response<Body> {
    app.oneshot(request(Method::PUT, uri, Some(user), Some(&body)))
        .await
        .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

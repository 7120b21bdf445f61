#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use configs::AppConfig;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_HOST: &str = "testserver";

/// Config pointing at a fresh SQLite file.
pub fn test_config() -> AppConfig {
    let path = std::env::temp_dir().join(format!("snippets-server-{}.db", Uuid::new_v4()));
    let mut cfg = AppConfig::default();
    cfg.database.url = format!("sqlite://{}?mode=rwc", path.display());
    cfg.database.max_connections = 4;
    cfg.database.min_connections = 1;
    cfg.auth.jwt_secret = "test-secret".into();
    cfg
}

/// Migrated database plus the full router.
pub async fn test_app() -> anyhow::Result<Router> {
    let cfg = test_config();
    let db = server::startup::prepare_database(&cfg).await?;
    Ok(server::startup::build_app(db, &cfg))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> TestResponse {
    let mut req = Request::builder().method(method).uri(uri).header(header::HOST, TEST_HOST);
    if let Some(t) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let req = match body {
        Some(v) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&v).expect("encode body")))
            .expect("request"),
        None => req.body(Body::empty()).expect("request"),
    };
    let resp = app.clone().oneshot(req).await.expect("infallible");
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.expect("body").to_vec();
    TestResponse { status, headers, body }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri, None, None).await
}

/// Register `username` and return a bearer token for it.
pub async fn login_as(app: &Router, username: &str) -> String {
    let creds = json!({ "username": username, "password": "Secret123!" });
    let r = send(app, Method::POST, "/auth/register", None, Some(creds.clone())).await;
    assert_eq!(r.status, StatusCode::CREATED, "register {username}: {}", r.text());
    let r = send(app, Method::POST, "/auth/login", None, Some(creds)).await;
    assert_eq!(r.status, StatusCode::OK, "login {username}: {}", r.text());
    r.json()["token"].as_str().expect("token").to_string()
}

pub async fn create_snippet(app: &Router, token: &str, body: Value) -> Value {
    let r = send(app, Method::POST, "/snippets/", Some(token), Some(body)).await;
    assert_eq!(r.status, StatusCode::CREATED, "create: {}", r.text());
    r.json()
}

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use common::{send, test_app};

#[tokio::test]
async fn test_register_and_login_flow() -> anyhow::Result<()> {
    let app = test_app().await?;
    let creds = json!({ "username": "tester", "password": "S3curePass!" });

    let r = send(&app, Method::POST, "/auth/register", None, Some(creds.clone())).await;
    assert_eq!(r.status, StatusCode::CREATED);
    let user = r.json();
    assert_eq!(user["username"], "tester");
    assert!(user["id"].is_string());

    let r = send(&app, Method::POST, "/auth/login", None, Some(creds)).await;
    assert_eq!(r.status, StatusCode::OK);
    let cookie = r.headers.get(header::SET_COOKIE).and_then(|v| v.to_str().ok()).unwrap_or_default().to_string();
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("HttpOnly"));
    let body = r.json();
    assert_eq!(body["username"], "tester");
    assert_eq!(body["user_id"], user["id"]);

    // the token authenticates writes
    let token = body["token"].as_str().unwrap_or_default();
    let r = send(&app, Method::POST, "/snippets/", Some(token), Some(json!({ "code": "x" }))).await;
    assert_eq!(r.status, StatusCode::CREATED);
    Ok(())
}

#[tokio::test]
async fn duplicate_username_conflicts() -> anyhow::Result<()> {
    let app = test_app().await?;
    let creds = json!({ "username": "dup", "password": "S3curePass!" });
    assert_eq!(send(&app, Method::POST, "/auth/register", None, Some(creds.clone())).await.status, StatusCode::CREATED);
    let r = send(&app, Method::POST, "/auth/register", None, Some(creds)).await;
    assert_eq!(r.status, StatusCode::CONFLICT);
    assert_eq!(r.json(), json!({ "detail": "username already taken" }));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_duplicate_registration_is_conflict() -> anyhow::Result<()> {
    let app = test_app().await?;
    for i in 0..10 {
        let creds = json!({ "username": format!("racer{i}"), "password": "S3curePass!" });
        let spawn_register = || {
            let (app, creds) = (app.clone(), creds.clone());
            tokio::spawn(async move { send(&app, Method::POST, "/auth/register", None, Some(creds)).await })
        };
        let (a, b) = (spawn_register(), spawn_register());
        let mut statuses = vec![a.await?.status, b.await?.status];
        statuses.sort();
        assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::CONFLICT], "racer{i}");

        let r = send(&app, Method::POST, "/auth/login", None, Some(creds)).await;
        assert_eq!(r.status, StatusCode::OK);
    }
    Ok(())
}

#[tokio::test]
async fn registration_validates_fields() -> anyhow::Result<()> {
    let app = test_app().await?;
    let r = send(&app, Method::POST, "/auth/register", None, Some(json!({ "username": "ok", "password": "short" }))).await;
    assert_eq!(r.status, StatusCode::BAD_REQUEST);
    assert!(r.json()["password"].is_array());

    let r = send(&app, Method::POST, "/auth/register", None, Some(json!({ "username": "has space", "password": "longenough" }))).await;
    assert_eq!(r.status, StatusCode::BAD_REQUEST);
    assert!(r.json()["username"].is_array());
    Ok(())
}

#[tokio::test]
async fn wrong_password_is_unauthorized() -> anyhow::Result<()> {
    let app = test_app().await?;
    let creds = json!({ "username": "eve", "password": "S3curePass!" });
    send(&app, Method::POST, "/auth/register", None, Some(creds)).await;

    let r = send(&app, Method::POST, "/auth/login", None, Some(json!({ "username": "eve", "password": "wrong-password" }))).await;
    assert_eq!(r.status, StatusCode::UNAUTHORIZED);
    assert!(r.headers.get(header::SET_COOKIE).is_none());
    let r = send(&app, Method::POST, "/auth/login", None, Some(json!({ "username": "nobody", "password": "S3curePass!" }))).await;
    assert_eq!(r.status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn logout_clears_cookie() -> anyhow::Result<()> {
    let app = test_app().await?;
    let req = Request::builder()
        .method(Method::POST)
        .uri("/auth/logout")
        .header(header::COOKIE, "auth_token=abc")
        .body(Body::empty())?;
    let resp = app.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let cookie = resp.headers().get(header::SET_COOKIE).and_then(|v| v.to_str().ok()).unwrap_or_default();
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("Max-Age=0"));
    Ok(())
}

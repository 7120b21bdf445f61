mod common;

use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let app = common::test_app().await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });
    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_snippet_lifecycle_over_http() -> anyhow::Result<()> {
    let app = start_server().await?;
    // cookie store carries the auth_token set by login
    let client = reqwest::Client::builder().cookie_store(true).build()?;

    let resp = client.get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(resp.status(), HttpStatusCode::OK);

    let creds = json!({ "username": "e2e", "password": "S3curePass!" });
    let resp = client.post(format!("{}/auth/register", app.base_url)).json(&creds).send().await?;
    assert_eq!(resp.status(), HttpStatusCode::CREATED);
    let resp = client.post(format!("{}/auth/login", app.base_url)).json(&creds).send().await?;
    assert_eq!(resp.status(), HttpStatusCode::OK);

    let resp = client
        .post(format!("{}/snippets/", app.base_url))
        .json(&json!({ "title": "e2e", "code": "fn main() {}", "language": "rust" }))
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::CREATED);
    let created: Value = resp.json().await?;
    let url = created["url"].as_str().unwrap_or_default().to_string();
    assert!(url.starts_with(&app.base_url));

    let fetched: Value = client.get(&url).send().await?.json().await?;
    assert_eq!(fetched, created);

    let resp = client.get(created["highlight"].as_str().unwrap_or_default()).send().await?;
    assert_eq!(resp.status(), HttpStatusCode::OK);
    assert!(resp.text().await?.contains("<pre"));

    let resp = client.delete(&url).send().await?;
    assert_eq!(resp.status(), HttpStatusCode::NO_CONTENT);

    // after logout writes are anonymous again
    let resp = client.post(format!("{}/auth/logout", app.base_url)).send().await?;
    assert_eq!(resp.status(), HttpStatusCode::NO_CONTENT);
    let resp = client
        .post(format!("{}/snippets/", app.base_url))
        .json(&json!({ "code": "x" }))
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::UNAUTHORIZED);

    let resp = client.get(&url).send().await?;
    assert_eq!(resp.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_openapi_document_is_served() -> anyhow::Result<()> {
    let app = start_server().await?;
    let doc: Value = reqwest::get(format!("{}/api-docs/openapi.json", app.base_url)).await?.json().await?;
    assert!(doc["paths"]["/snippets/"].is_object());
    assert!(doc["paths"]["/users/{id}/"].is_object());
    Ok(())
}

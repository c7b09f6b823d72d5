#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use configs::{AppConfig, ServiceKind};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;

pub const API_KEY: &str = "TopSecretAPIKey";

/// Router for `kind` over a fresh in-memory database.
pub async fn test_app(kind: ServiceKind) -> anyhow::Result<Router> {
    Ok(test_app_with_db(kind).await?.0)
}

/// Like `test_app`, also handing back the connection the router uses.
pub async fn test_app_with_db(kind: ServiceKind) -> anyhow::Result<(Router, DatabaseConnection)> {
    let db = models::db::connect("sqlite::memory:").await?;
    server::startup::migrate(kind, &db).await?;
    let mut cfg = AppConfig::default();
    cfg.cafes.api_key = API_KEY.to_string();
    let app = server::app(kind, db.clone(), &cfg)?;
    Ok((app, db))
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    call(app, req).await
}

pub async fn send_form(app: &Router, uri: &str, pairs: &[(&str, &str)]) -> (StatusCode, Value) {
    let encoded = serde_urlencoded::to_string(pairs).unwrap();
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(encoded))
        .unwrap();
    call(app, req).await
}

pub async fn get_text(app: &Router, uri: &str) -> (StatusCode, String) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, json)
}

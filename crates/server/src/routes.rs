use axum::{middleware, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::openapi::OpenApi as OpenApiDoc;

use common::{metrics, types::Health};

pub mod videos;
pub mod tasks;
pub mod cafes;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn metrics_text() -> (axum::http::StatusCode, String) {
    metrics::encode_metrics()
}

/// Wrap a service router with the endpoints and layers every service shares:
/// health, metrics, the OpenAPI document, request counting, CORS and tracing.
pub fn with_ambient(service_name: &'static str, api: Router, doc: OpenApiDoc) -> Router {
    api.route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .route("/api-docs/openapi.json", get(move || async move { Json(doc) }))
        .layer(middleware::from_fn_with_state(service_name, metrics::track_requests))
        .layer(CorsLayer::very_permissive())
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

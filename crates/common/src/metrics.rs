use std::time::Instant;

use axum::{extract::{Request, State}, http::StatusCode, middleware::Next, response::Response};
use once_cell::sync::Lazy;
use prometheus::{register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec, TextEncoder};

pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "record_http_requests_total",
        "Total HTTP requests handled",
        &["service", "method", "status"]
    )
    .expect("register record_http_requests_total")
});

pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "record_http_request_duration_seconds",
        "Request duration in seconds",
        &["service"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]
    )
    .expect("register record_http_request_duration_seconds")
});

/// Middleware counting every request per service, method and final status.
/// Install with `axum::middleware::from_fn_with_state(service_name, track_requests)`.
pub async fn track_requests(State(service): State<&'static str>, req: Request, next: Next) -> Response {
    let method = req.method().as_str().to_owned();
    let start = Instant::now();
    let resp = next.run(req).await;
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[service, &method, resp.status().as_str()])
        .inc();
    HTTP_REQUEST_DURATION
        .with_label_values(&[service])
        .observe(start.elapsed().as_secs_f64());
    resp
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}"));
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, routing::get, Router};
    use tower::ServiceExt;

    #[tokio::test]
    async fn counts_requests_by_status() {
        let app = Router::new()
            .route("/ok", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn_with_state("metrics_test", track_requests));

        let before = HTTP_REQUESTS_TOTAL.with_label_values(&["metrics_test", "GET", "200"]).get();
        let resp = app
            .clone()
            .oneshot(Request::builder().uri("/ok").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let missing = app
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        assert_eq!(HTTP_REQUESTS_TOTAL.with_label_values(&["metrics_test", "GET", "200"]).get(), before + 1);
        assert!(HTTP_REQUESTS_TOTAL.with_label_values(&["metrics_test", "GET", "404"]).get() >= 1);

        let (status, text) = encode_metrics();
        assert_eq!(status, StatusCode::OK);
        assert!(text.contains("record_http_requests_total"));
    }
}

mod support;

use axum::http::{Method, StatusCode};
use configs::ServiceKind;
use serde_json::json;
use support::{send, test_app};

#[tokio::test]
async fn task_crud() -> anyhow::Result<()> {
    let app = test_app(ServiceKind::Tasks).await?;

    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, first) = send(&app, Method::POST, "/", Some(json!({"name": "write report"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["name"], "write report");
    let (_, second) = send(&app, Method::POST, "/", Some(json!({"name": "buy milk"}))).await;

    let (_, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(body, json!([first, second]));

    let id = first["id"].as_i64().unwrap();
    let (status, body) = send(&app, Method::PUT, &format!("/{id}"), Some(json!({"name": "send report"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": id, "name": "send report"}));

    let (status, body) = send(&app, Method::DELETE, &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Task deleted successfully", "id": id}));

    let (status, _) = send(&app, Method::GET, &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn missing_tasks_are_not_found() -> anyhow::Result<()> {
    let app = test_app(ServiceKind::Tasks).await?;

    for method in [Method::GET, Method::DELETE] {
        let (status, body) = send(&app, method, "/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Task not found");
    }
    let (status, _) = send(&app, Method::PUT, "/42", Some(json!({"name": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn blank_or_missing_name_rejected() -> anyhow::Result<()> {
    let app = test_app(ServiceKind::Tasks).await?;

    let (status, _) = send(&app, Method::POST, "/", Some(json!({"name": "   "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, Method::POST, "/", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(body, json!([]));
    Ok(())
}

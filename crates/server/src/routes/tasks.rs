use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use models::task;
use service::task_service::TaskService;

use crate::errors::ApiError;

#[derive(Debug, Deserialize)]
pub struct TaskInput {
    pub name: String,
}

#[utoipa::path(get, path = "/", tag = "tasks",
    responses((status = 200, description = "OK", body = [crate::openapi::TaskDoc])))]
pub async fn list_tasks(State(tasks): State<TaskService>) -> Result<Json<Vec<task::Model>>, ApiError> {
    Ok(Json(tasks.list().await?))
}

#[utoipa::path(post, path = "/", tag = "tasks",
    request_body = crate::openapi::TaskInputDoc,
    responses((status = 201, description = "Created", body = crate::openapi::TaskDoc), (status = 400, description = "Bad Request")))]
pub async fn create_task(
    State(tasks): State<TaskService>,
    body: Result<Json<TaskInput>, JsonRejection>,
) -> Result<(StatusCode, Json<task::Model>), ApiError> {
    let Json(input) = body?;
    let created = tasks.create(&input.name).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/{id}", tag = "tasks",
    params(("id" = i32, Path, description = "Task id")),
    responses((status = 200, description = "OK", body = crate::openapi::TaskDoc), (status = 404, description = "Not Found")))]
pub async fn get_task(
    State(tasks): State<TaskService>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<task::Model>, ApiError> {
    let Path(id) = id?;
    Ok(Json(tasks.get(id).await?))
}

#[utoipa::path(put, path = "/{id}", tag = "tasks",
    params(("id" = i32, Path, description = "Task id")),
    request_body = crate::openapi::TaskInputDoc,
    responses((status = 200, description = "OK", body = crate::openapi::TaskDoc), (status = 400, description = "Bad Request"), (status = 404, description = "Not Found")))]
pub async fn update_task(
    State(tasks): State<TaskService>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<TaskInput>, JsonRejection>,
) -> Result<Json<task::Model>, ApiError> {
    let Path(id) = id?;
    let Json(input) = body?;
    Ok(Json(tasks.rename(id, &input.name).await?))
}

#[utoipa::path(delete, path = "/{id}", tag = "tasks",
    params(("id" = i32, Path, description = "Task id")),
    responses((status = 200, description = "Deleted", body = crate::openapi::DeletedDoc), (status = 404, description = "Not Found")))]
pub async fn delete_task(
    State(tasks): State<TaskService>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    tasks.delete(id).await?;
    Ok(Json(json!({"message": "Task deleted successfully", "id": id})))
}

pub fn router(tasks: TaskService) -> Router {
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/:id", get(get_task).put(update_task).delete(delete_task))
        .with_state(tasks)
}

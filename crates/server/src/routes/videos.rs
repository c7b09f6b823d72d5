use std::sync::Arc;

use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use models::video;
use service::{
    people::{Person, PersonDirectory},
    video_service::{NewVideo, VideoPatch, VideoService},
};

use crate::errors::ApiError;

#[derive(Clone)]
pub struct VideoState {
    pub videos: VideoService,
    pub people: Arc<dyn PersonDirectory>,
}

/// Full record for `PUT`; every field is required.
#[derive(Debug, Deserialize)]
pub struct VideoInput {
    pub name: String,
    pub views: i64,
    pub likes: i64,
}

#[derive(Debug, Deserialize, Default)]
pub struct VideoPatchInput {
    pub name: Option<String>,
    pub views: Option<i64>,
    pub likes: Option<i64>,
}

#[utoipa::path(get, path = "/video/{id}", tag = "videos",
    params(("id" = i32, Path, description = "Video id")),
    responses((status = 200, description = "OK", body = crate::openapi::VideoDoc), (status = 404, description = "Not Found")))]
pub async fn get_video(
    State(state): State<VideoState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<video::Model>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.videos.get(id).await?))
}

#[utoipa::path(put, path = "/video/{id}", tag = "videos",
    params(("id" = i32, Path, description = "Video id")),
    request_body = crate::openapi::VideoInputDoc,
    responses((status = 201, description = "Created", body = crate::openapi::VideoDoc), (status = 400, description = "Bad Request"), (status = 409, description = "Conflict")))]
pub async fn put_video(
    State(state): State<VideoState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<VideoInput>, JsonRejection>,
) -> Result<(StatusCode, Json<video::Model>), ApiError> {
    let Path(id) = id?;
    let Json(input) = body?;
    let created = state
        .videos
        .create(id, NewVideo { name: input.name, views: input.views, likes: input.likes })
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(patch, path = "/video/{id}", tag = "videos",
    params(("id" = i32, Path, description = "Video id")),
    request_body = crate::openapi::VideoPatchDoc,
    responses((status = 200, description = "OK", body = crate::openapi::VideoDoc), (status = 400, description = "Bad Request"), (status = 404, description = "Not Found")))]
pub async fn patch_video(
    State(state): State<VideoState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<VideoPatchInput>, JsonRejection>,
) -> Result<Json<video::Model>, ApiError> {
    let Path(id) = id?;
    let Json(input) = body?;
    let patch = VideoPatch { name: input.name, views: input.views, likes: input.likes };
    Ok(Json(state.videos.patch(id, patch).await?))
}

#[utoipa::path(delete, path = "/video/{id}", tag = "videos",
    params(("id" = i32, Path, description = "Video id")),
    responses((status = 200, description = "Deleted", body = crate::openapi::DeletedDoc), (status = 404, description = "Not Found")))]
pub async fn delete_video(
    State(state): State<VideoState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    state.videos.delete(id).await?;
    info!(video_id = id, "video_delete_ack");
    Ok(Json(json!({"message": "Video deleted successfully", "id": id})))
}

#[utoipa::path(get, path = "/helloworld/{name}", tag = "people",
    params(("name" = String, Path, description = "Person name")),
    responses((status = 200, description = "OK", body = crate::openapi::PersonDoc), (status = 404, description = "Not Found")))]
pub async fn get_person(
    State(state): State<VideoState>,
    Path(name): Path<String>,
) -> Result<Json<Person>, ApiError> {
    state
        .people
        .lookup(&name)
        .map(Json)
        .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, format!("No person named '{name}'")))
}

#[utoipa::path(post, path = "/helloworld/{name}", tag = "people",
    params(("name" = String, Path, description = "Person name")),
    responses((status = 200, description = "OK")))]
pub async fn post_person(Path(_name): Path<String>) -> Json<Value> {
    Json(json!({"data": "data posted"}))
}

pub fn router(state: VideoState) -> Router {
    Router::new()
        .route("/video/:id", get(get_video).put(put_video).patch(patch_video).delete(delete_video))
        .route("/helloworld/:name", get(get_person).post(post_person))
        .route("/helloworld/:name/", get(get_person).post(post_person))
        .with_state(state)
}

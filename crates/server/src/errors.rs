use axum::extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::ModelError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// HTTP-facing error: a status plus the message placed under `error`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(m) | ServiceError::Model(ModelError::Validation(m)) => {
                Self::new(StatusCode::BAD_REQUEST, m)
            }
            ServiceError::NotFound(m) => Self::new(StatusCode::NOT_FOUND, m),
            ServiceError::Conflict(m) => Self::new(StatusCode::CONFLICT, m),
            ServiceError::Forbidden(m) => Self::new(StatusCode::FORBIDDEN, m),
            ServiceError::Db(m) | ServiceError::Model(ModelError::Db(m)) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, m)
            }
        }
    }
}

macro_rules! rejection_as_bad_request {
    ($($rejection:ty),*) => {
        $(impl From<$rejection> for ApiError {
            fn from(r: $rejection) -> Self {
                Self::bad_request(r.body_text())
            }
        })*
    };
}

rejection_as_bad_request!(JsonRejection, QueryRejection, PathRejection, FormRejection);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.message, "request failed");
        }
        (self.status, Json(serde_json::json!({"error": self.message}))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("migration failed: {0}")]
    Migration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(e: ServiceError) -> StatusCode {
        ApiError::from(e).status
    }

    #[test]
    fn service_errors_map_to_statuses() {
        assert_eq!(status_of(ServiceError::Validation("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(ModelError::Validation("x".into()).into()), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(ServiceError::NotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status_of(ServiceError::Conflict("x".into())), StatusCode::CONFLICT);
        assert_eq!(status_of(ServiceError::Forbidden("x".into())), StatusCode::FORBIDDEN);
        assert_eq!(status_of(ServiceError::Db("x".into())), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status_of(ModelError::Db("x".into()).into()), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn message_is_carried_without_prefix() {
        let e = ApiError::from(ServiceError::Forbidden("Forbidden: Invalid API key.".into()));
        assert_eq!(e.message, "Forbidden: Invalid API key.");
    }
}

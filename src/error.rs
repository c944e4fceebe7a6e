use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use axum_valid::{Valid, ValidRejection, ValidationRejection};
use model::ModelError;
use sea_orm::DbErr;
use thiserror::Error;
use tracing::{error, warn};
use validator::ValidationErrors;

use crate::photo::PhotoError;
use crate::schemas::ErrorResponse;

/// JSON body checked with `validator`, with rejections reported as [`ApiError`].
pub type ValidatedJson<T> = Result<Valid<Json<T>>, ValidRejection<JsonRejection>>;

/// Errors returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Photo(#[from] PhotoError),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    Payload(#[from] JsonRejection),

    #[error("Unable to log in with provided credentials")]
    InvalidCredentials,

    #[error("{0} not found")]
    NotFound(String),
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        ApiError::Model(ModelError::Database(err))
    }
}

impl From<ValidRejection<JsonRejection>> for ApiError {
    fn from(rejection: ValidRejection<JsonRejection>) -> Self {
        match rejection {
            ValidationRejection::Valid(errors) => ApiError::Validation(errors),
            ValidationRejection::Inner(inner) => ApiError::Payload(inner),
        }
    }
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Model(ModelError::MissingField(_)) => (StatusCode::BAD_REQUEST, "MISSING_FIELD"),
            ApiError::Model(ModelError::InvalidRange { .. }) => {
                (StatusCode::BAD_REQUEST, "INVALID_RANGE")
            }
            ApiError::Model(ModelError::Conflict(_)) => (StatusCode::CONFLICT, "CONFLICT"),
            ApiError::Model(ModelError::Forbidden) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ApiError::Model(ModelError::Password(_) | ModelError::Database(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
            ApiError::Photo(PhotoError::Io(_)) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Photo(_) => (StatusCode::BAD_REQUEST, "INVALID_PHOTO"),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Payload(rejection) => (rejection.status(), "INVALID_PAYLOAD"),
            ApiError::InvalidCredentials => (StatusCode::BAD_REQUEST, "INVALID_CREDENTIALS"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = if status.is_server_error() {
            error!("Request failed: {}", self);
            "Internal server error".to_string()
        } else {
            warn!(code, "Request rejected: {}", self);
            self.to_string()
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            success: false,
        };

        (status, Json(body)).into_response()
    }
}

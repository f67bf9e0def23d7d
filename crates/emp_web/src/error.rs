//! HTTP-facing error type and its response mapping.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use emp_core::{EmployeeServiceError, FieldError, FormErrors, RepoError};
use log::error;
use serde::Serialize;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(FormErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<FieldError>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if let Self::Internal(message) = &self {
            error!("event=http_request module=web status=error error={message}");
        }

        let body = ErrorBody {
            message: self.to_string(),
            errors: match &self {
                Self::Validation(errors) => errors.errors().to_vec(),
                _ => Vec::new(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<EmployeeServiceError> for AppError {
    fn from(value: EmployeeServiceError) -> Self {
        match value {
            EmployeeServiceError::EmployeeNotFound(id) => {
                Self::NotFound(format!("employee {id} not found"))
            }
            EmployeeServiceError::InvalidForm(errors) => Self::Validation(errors),
            EmployeeServiceError::Repo(err) => Self::Internal(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(value: RepoError) -> Self {
        EmployeeServiceError::from(value).into()
    }
}

impl From<FormErrors> for AppError {
    fn from(value: FormErrors) -> Self {
        Self::Validation(value)
    }
}

impl From<FieldError> for AppError {
    fn from(value: FieldError) -> Self {
        Self::Validation(value.into())
    }
}

impl From<MultipartError> for AppError {
    fn from(value: MultipartError) -> Self {
        Self::BadRequest(format!("invalid multipart request: {}", value.body_text()))
    }
}

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Result alias for page handlers and repository operations.
pub type AppResult<T> = Result<T, AppError>;

/// AppError
///
/// Failures a page handler can report. Each maps to one HTTP status and a JSON body.
#[derive(Debug, Error, PartialEq)]
pub enum AppError {
    #[error("course {0} not found")]
    CourseNotFound(u32),

    #[error("team {team_id} not found in course {course_id}")]
    TeamNotFound { course_id: u32, team_id: String },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Forbidden(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::CourseNotFound(_) | AppError::TeamNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::CourseNotFound(_) => "course_not_found",
            AppError::TeamNotFound { .. } => "team_not_found",
            AppError::Validation(_) => "validation_error",
            AppError::Forbidden(_) => "forbidden",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CourseError {
    #[error("Course not found: {0}")]
    CourseNotFound(Uuid),

    #[error("Lesson not found: {0}")]
    LessonNotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CourseResult<T> = Result<T, CourseError>;

/// Convert CourseError to AppError for standardized error responses
impl From<CourseError> for AppError {
    fn from(err: CourseError) -> Self {
        match err {
            CourseError::CourseNotFound(id) => {
                AppError::NotFound(format!("Course {} not found", id))
            }
            CourseError::LessonNotFound(id) => {
                AppError::NotFound(format!("Lesson {} not found", id))
            }
            CourseError::Validation(msg) => AppError::BadRequest(msg),
            CourseError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CourseError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

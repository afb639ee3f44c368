use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("Subscription not found: {0}")]
    NotFound(Uuid),

    #[error("Course not found: {0}")]
    CourseNotFound(Uuid),

    #[error("User {user_id} is already subscribed to course {course_id}")]
    AlreadySubscribed { user_id: Uuid, course_id: Uuid },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type SubscriptionResult<T> = Result<T, SubscriptionError>;

/// Convert SubscriptionError to AppError for standardized error responses
impl From<SubscriptionError> for AppError {
    fn from(err: SubscriptionError) -> Self {
        match err {
            SubscriptionError::NotFound(id) => {
                AppError::NotFound(format!("Subscription {} not found", id))
            }
            SubscriptionError::CourseNotFound(id) => {
                AppError::NotFound(format!("Course {} not found", id))
            }
            SubscriptionError::AlreadySubscribed { course_id, .. } => {
                AppError::Conflict(format!("Already subscribed to course {}", course_id))
            }
            SubscriptionError::Validation(msg) => AppError::BadRequest(msg),
            SubscriptionError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for SubscriptionError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

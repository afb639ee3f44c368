use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type PaymentResult<T> = Result<T, PaymentError>;

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

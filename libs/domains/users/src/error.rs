use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

use crate::models::UserId;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Invalid user data: {0}")]
    Validation(String),

    #[error("Email address '{0}' is already in use")]
    DuplicateEmail(String),

    #[error("User not found: {0}")]
    NotFound(UserId),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    /// Both rule violations and email collisions are reported to clients as validation failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, UserError::Validation(_) | UserError::DuplicateEmail(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, UserError::NotFound(_))
    }
}

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => AppError::NotFound(format!("User {} not found", id)),
            err @ (UserError::Validation(_) | UserError::DuplicateEmail(_)) => {
                AppError::BadRequest(err.to_string())
            }
            UserError::Storage(msg) => AppError::Storage(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

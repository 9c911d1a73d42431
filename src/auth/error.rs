use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failures shown to the user as a single-line message.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Please fill all required fields")]
    MissingFields,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Email already registered")]
    EmailTaken,
    #[error("Already logged in")]
    AlreadyLoggedIn,
    #[error("User not found")]
    UserNotFound,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("Not logged in")]
    NotLoggedIn,
    #[error("{message}")]
    InvalidBody { status: StatusCode, message: String },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingFields | AuthError::PasswordMismatch => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AuthError::EmailTaken | AuthError::AlreadyLoggedIn => StatusCode::CONFLICT,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::IncorrectPassword | AuthError::NotLoggedIn => StatusCode::UNAUTHORIZED,
            AuthError::InvalidBody { status, .. } => *status,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text().replace('\n', " "),
        }
    }
}

impl From<PathRejection> for AuthError {
    fn from(rejection: PathRejection) -> Self {
        AuthError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text().replace('\n', " "),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let error = match self {
            AuthError::Internal(e) => {
                tracing::error!(error = %format!("{e:#}"), "internal error");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

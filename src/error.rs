use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use thiserror::Error;

use crate::web::views;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Bad credentials. Deliberately one variant for unknown-username and
    /// wrong-password so callers cannot tell which occurred.
    #[error("Invalid credentials")]
    AuthFailure,

    #[error("Username already taken")]
    DuplicateUsername,

    /// No valid session on a route that needs one.
    #[error("Authentication required")]
    AuthRequired,

    #[error("Permission denied")]
    Forbidden,

    #[error("Not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    Hash(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

// Auth outcomes are control flow, not error pages: an unauthenticated or
// failed-login request lands back on the relevant form. Only role and
// lookup failures surface as explicit statuses.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::AuthRequired | AppError::AuthFailure => {
                Redirect::to("/login").into_response()
            }
            AppError::DuplicateUsername => Redirect::to("/signup").into_response(),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, views::error_page(&msg)).into_response()
            }
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Permission Denied").into_response(),
            AppError::NotFound => {
                (StatusCode::NOT_FOUND, views::not_found_page()).into_response()
            }
            AppError::Database(_)
            | AppError::Hash(_)
            | AppError::Config(_)
            | AppError::Internal(_) => {
                tracing::error!("request failed: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    views::error_page("Something went wrong"),
                )
                    .into_response()
            }
        }
    }
}

use axum::{
    response::{IntoResponse, Response},
    Json,
    http::StatusCode,
};
use serde::Serialize;
use tracing::error;

/// Message sent for any failure that is not an HTTP-level error.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to fetch data: {0}")]
    FetchError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Template rendering error: {0}")]
    RenderError(String),

    #[error("Handler panicked: {0}")]
    Panic(String),

    #[error("{message}")]
    Http {
        status: StatusCode,
        message: String,
    },
}

impl AppError {
    pub fn not_found() -> Self {
        AppError::Http {
            status: StatusCode::NOT_FOUND,
            message: "The requested URL was not found on the server.".to_string(),
        }
    }

    pub fn method_not_allowed() -> Self {
        AppError::Http {
            status: StatusCode::METHOD_NOT_ALLOWED,
            message: "The method is not allowed for the requested URL.".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Http { status, message } => (status, message),
            other => {
                error!(error = %other, "Unexpected error");
                (StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED_ERROR.to_string())
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::FetchError(err.to_string())
    }
}

impl From<handlebars::RenderError> for AppError {
    fn from(err: handlebars::RenderError) -> Self {
        AppError::RenderError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::any::Any;
use thiserror::Error;
use tracing::{error, warn};
use userapi_core::{ApiResponse, CoreError};

pub const ROUTE_NOT_FOUND: &str = "Route not found";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";
pub const GENERIC_DETAIL: &str = "Something went wrong";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Route not found: {path}")]
    NotFound { path: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl ApiError {
    /// The detail is only exposed to clients when diagnostics are on.
    pub fn internal(detail: impl std::fmt::Display, diagnostics: bool) -> Self {
        let detail = detail.to_string();
        error!("Unhandled error: {}", detail);

        let message = if diagnostics {
            detail
        } else {
            GENERIC_DETAIL.to_string()
        };
        Self::Internal { message }
    }

    pub fn from_core(err: CoreError, diagnostics: bool) -> Self {
        match err {
            CoreError::Validation(msg) => Self::Validation(msg),
            other => Self::internal(other, diagnostics),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body: ApiResponse<()> = match self {
            ApiError::Validation(msg) => ApiResponse::error(msg),
            ApiError::NotFound { path } => ApiResponse::error(ROUTE_NOT_FOUND).with_path(path),
            ApiError::Internal { message } => {
                ApiResponse::error(INTERNAL_SERVER_ERROR).with_message(message)
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Converts a handler panic into the 500 envelope.
pub fn panic_response(err: Box<dyn Any + Send + 'static>, diagnostics: bool) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    warn!("Handler panicked");
    ApiError::internal(detail, diagnostics).into_response()
}

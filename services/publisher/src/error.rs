//! Custom error types for the publisher service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::ClientError;
use serde_json::json;
use thiserror::Error;

/// Custom error type for the publisher handlers
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or out-of-range client input
    #[error("{0}")]
    BadRequest(String),

    /// An upstream call failed while serving the request
    #[error("{context}: {source}")]
    Upstream {
        context: &'static str,
        #[source]
        source: ClientError,
    },
}

impl ApiError {
    /// Wrap a client error with the step that produced it
    pub fn upstream(context: &'static str) -> impl FnOnce(ClientError) -> Self {
        move |source| ApiError::Upstream { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.to_string(),
        }));

        (self.status(), body).into_response()
    }
}

/// Error returned by the publish endpoint, which reports `success: false`
#[derive(Error, Debug)]
#[error(transparent)]
pub struct PublishError(#[from] pub ApiError);

impl IntoResponse for PublishError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": self.0.to_string(),
        }));

        (self.0.status(), body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

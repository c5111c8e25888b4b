//! Outbound HTTP clients for the content store, text generation, and image search

use common::error::{ClientError, ClientResult};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::error;

pub mod ollama;
pub mod pixabay;
pub mod wordpress;

pub use ollama::OllamaClient;
pub use pixabay::PixabayClient;
pub use wordpress::{MediaReference, Post, PostStatus, WordPressClient};

/// Fail with `ClientError::Remote` unless the response status is one of `accepted`
pub(crate) async fn expect_status(
    service: &'static str,
    operation: &str,
    response: Response,
    accepted: &[StatusCode],
) -> ClientResult<Response> {
    let status = response.status();
    if accepted.contains(&status) {
        return Ok(response);
    }

    error!("{} failed with status {}", operation, status.as_u16());
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Remote {
        service,
        status: status.as_u16(),
        body,
    })
}

/// Read the whole body and decode it as JSON
pub(crate) async fn decode_json<T: DeserializeOwned>(
    service: &'static str,
    response: Response,
) -> ClientResult<T> {
    let body = response
        .bytes()
        .await
        .map_err(|e| ClientError::Fetch(format!("failed to read {} response: {}", service, e)))?;

    serde_json::from_slice(&body).map_err(|e| ClientError::InvalidResponse {
        service,
        message: e.to_string(),
    })
}

//! Custom error types for the common library
//!
//! This module defines the errors raised by the outbound HTTP clients
//! (content store, text generation, image search).

use thiserror::Error;

/// Error raised by an outbound client call
#[derive(Error, Debug)]
pub enum ClientError {
    /// Input rejected before any network call was made
    #[error("{0}")]
    Validation(String),

    /// Dependency answered with a non-success status
    #[error("{service} API error ({status}): {body}")]
    Remote {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// Dependency answered successfully but the body could not be decoded
    #[error("failed to decode {service} response: {message}")]
    InvalidResponse {
        service: &'static str,
        message: String,
    },

    /// Dependency could not be reached or the transfer failed
    #[error("{0}")]
    Fetch(String),

    /// Search completed without any result
    #[error("{0}")]
    NotFound(String),
}

/// Type alias for Result with ClientError
pub type ClientResult<T> = Result<T, ClientError>;

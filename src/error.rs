//! Error types for capture and Vision API calls
//!
//! Every error is terminal for the call that produced it. Nothing here is
//! retried.

use std::io;
use thiserror::Error;

/// Top-level error for one capture-and-recognize run
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Vision API error: {0}")]
    Api(#[from] ApiError),
}

/// Errors raised while obtaining a snapshot
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("No capture device available")]
    Unavailable,

    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    #[error("Failed to decode source image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode JPEG: {0}")]
    Encode(#[source] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised by the Vision API client
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure or non-success HTTP status
    #[error("Network error: {0}")]
    Network(String),

    /// Response body was not valid JSON
    #[error("Failed to parse response: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Failed to serialize request: {0}")]
    Encode(#[source] serde_json::Error),
}

// The request URL carries the API key, so it is stripped from messages.
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.without_url().to_string())
    }
}

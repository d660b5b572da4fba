//! Vision/OCR Layer
//!
//! Text recognition through the Google Cloud Vision REST API.

pub mod client;
pub mod types;

pub use client::VisionClient;

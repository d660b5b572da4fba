//! Cloud Vision text detection client
//!
//! One call builds one request, issues one POST and extracts the
//! `fullTextAnnotation` text. There is no retry and no timeout override.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info, warn};

use super::types::{
    AnnotateImageRequest, Feature, FeatureType, ImageContent, ImageContext, RequestBody,
    ResponseBody,
};
use crate::config::VisionConfig;
use crate::error::ApiError;

/// Client for the `images:annotate` endpoint
#[derive(Debug, Clone)]
pub struct VisionClient {
    http: reqwest::Client,
    config: VisionConfig,
}

impl VisionClient {
    /// Create a client for the given configuration
    pub fn new(config: VisionConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Create a client sharing an existing connection pool
    pub fn with_http_client(config: VisionConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    /// Build the request envelope for one image.
    ///
    /// Always exactly one request with exactly one `TEXT_DETECTION` feature.
    pub fn build_request(&self, image_bytes: &[u8]) -> RequestBody {
        let image_context = if self.config.language_hints.is_empty() {
            None
        } else {
            Some(ImageContext {
                lat_long_rect: None,
                language_hints: self.config.language_hints.clone(),
            })
        };

        RequestBody {
            requests: vec![AnnotateImageRequest {
                image: ImageContent {
                    content: STANDARD.encode(image_bytes),
                },
                features: vec![Feature {
                    feature_type: FeatureType::TextDetection,
                    max_results: self.config.max_results,
                }],
                image_context,
            }],
        }
    }

    /// Submit a JPEG image and return the recognized text.
    ///
    /// Returns an empty string when the response carries no usable text.
    pub async fn recognize_text(&self, image_bytes: &[u8]) -> Result<String, ApiError> {
        let request = self.build_request(image_bytes);
        let payload = serde_json::to_vec(&request).map_err(ApiError::Encode)?;

        info!(
            "Submitting {} byte image to {}",
            image_bytes.len(),
            self.config.endpoint
        );

        let response = self
            .http
            .post(&self.config.endpoint)
            .query(&[("key", self.config.api_key.as_str())])
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Network(format!(
                "Vision API returned status {}",
                status
            )));
        }

        let body = response.bytes().await?;
        debug!("Response: {}", String::from_utf8_lossy(&body));

        let parsed = parse_response(&body)?;
        Ok(extract_text(&parsed))
    }
}

/// Parse a response body.
///
/// Only malformed JSON is an error. Valid JSON that does not match the
/// expected shape yields an empty [`ResponseBody`].
pub fn parse_response(body: &[u8]) -> Result<ResponseBody, ApiError> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(ApiError::Parse)?;

    match serde_json::from_value(value) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            warn!("Unexpected response shape, treating as empty: {}", e);
            Ok(ResponseBody::default())
        }
    }
}

/// Full text of the only response, or `""` if there is not exactly one
/// response or it carries no text.
pub fn extract_text(body: &ResponseBody) -> String {
    match body.responses.as_slice() {
        [only] => only
            .full_text_annotation
            .as_ref()
            .and_then(|annotation| annotation.text.clone())
            .unwrap_or_default(),
        other => {
            debug!("Expected exactly one response, got {}", other.len());
            String::new()
        }
    }
}

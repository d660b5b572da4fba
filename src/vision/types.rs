//! Wire types for the Cloud Vision `images:annotate` endpoint
//!
//! Field names follow the REST schema (camelCase). Response types are
//! lenient: missing or `null` fields fall back to their defaults.

use serde::{Deserialize, Deserializer, Serialize};

/// Image analysis requested from the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureType {
    #[default]
    TypeUnspecified,
    FaceDetection,
    LandmarkDetection,
    LogoDetection,
    LabelDetection,
    TextDetection,
    SafeSearchDetection,
    ImageProperties,
}

/// Base64-encoded image payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageContent {
    pub content: String,
}

/// One requested feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    #[serde(rename = "type")]
    pub feature_type: FeatureType,
    pub max_results: u32,
}

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LatLng {
    #[serde(deserialize_with = "nullable")]
    pub latitude: f64,
    #[serde(deserialize_with = "nullable")]
    pub longitude: f64,
}

/// Area restriction for landmark detection
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatLongRect {
    pub min_lat_lng: LatLng,
    pub max_lat_lng: LatLng,
}

/// Optional hints that accompany an image
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat_long_rect: Option<LatLongRect>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub language_hints: Vec<String>,
}

/// A single image plus the features to run on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateImageRequest {
    pub image: ImageContent,
    pub features: Vec<Feature>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image_context: Option<ImageContext>,
}

/// Top-level request envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    pub requests: Vec<AnnotateImageRequest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Vertex {
    #[serde(deserialize_with = "nullable")]
    pub x: f32,
    #[serde(deserialize_with = "nullable")]
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundingPoly {
    #[serde(deserialize_with = "nullable")]
    pub vertices: Vec<Vertex>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocationInfo {
    pub lat_lng: Option<LatLng>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Property {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub value: String,
}

/// Shape shared by `fullTextAnnotation` and `textAnnotations` entries
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextAnnotation {
    pub mid: Option<String>,
    pub locale: Option<String>,
    pub description: Option<String>,
    pub text: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub score: f32,
    #[serde(deserialize_with = "nullable")]
    pub confidence: f32,
    #[serde(deserialize_with = "nullable")]
    pub topicality: f32,
    pub bounding_poly: Option<BoundingPoly>,
    #[serde(deserialize_with = "nullable")]
    pub locations: Vec<LocationInfo>,
    #[serde(deserialize_with = "nullable")]
    pub properties: Vec<Property>,
}

/// Result for one submitted image
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnnotateImageResponse {
    pub text_annotations: Option<Vec<TextAnnotation>>,
    pub full_text_annotation: Option<TextAnnotation>,
}

/// Top-level response envelope
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseBody {
    #[serde(deserialize_with = "nullable")]
    pub responses: Vec<AnnotateImageResponse>,
}

/// Treat an explicit `null` the same as a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

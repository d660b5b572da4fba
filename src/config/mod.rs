//! Application Configuration
//!
//! User settings stored in TOML format.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Public Cloud Vision annotate endpoint
pub const DEFAULT_ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";

/// Number of results requested per feature
pub const DEFAULT_MAX_RESULTS: u32 = 10;

/// Environment variable consulted for the API key
pub const API_KEY_ENV: &str = "GOOGLE_VISION_API_KEY";

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Vision API settings
    pub vision: VisionConfig,
    /// Capture settings
    pub capture: CaptureSettings,
}

/// Settings for the Cloud Vision client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    /// Static API key sent as the `key` query parameter
    pub api_key: String,
    /// Annotate endpoint URL (without query string)
    pub endpoint: String,
    /// `maxResults` for the text detection feature
    pub max_results: u32,
    /// Optional BCP-47 language hints, sent as `imageContext.languageHints`
    pub language_hints: Vec<String>,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            language_hints: Vec::new(),
        }
    }
}

#[cfg(test)]
impl VisionConfig {
    /// Config for the given key with every other field at its default
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }
}

/// Capture-related settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureSettings {
    /// Still image used as the capture device
    pub source: Option<String>,
    /// JPEG quality (1 - 100)
    pub jpeg_quality: u8,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            source: None,
            jpeg_quality: 75,
        }
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Pick the API key: explicit value, then environment, then config file.
///
/// Empty strings count as unset at every level.
pub fn resolve_api_key(
    explicit: Option<&str>,
    env_value: Option<&str>,
    config: &VisionConfig,
) -> Option<String> {
    [explicit, env_value, Some(config.api_key.as_str())]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|key| !key.is_empty())
        .map(str::to_string)
}

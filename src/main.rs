//! SnapText - capture a still frame and read its text with Google Cloud Vision
//!
//! Each invocation performs exactly one capture and one `images:annotate`
//! call, then prints the recognized text to stdout.

mod app;
mod capture;
mod config;
mod error;
mod shared;
mod storage;
mod vision;

#[cfg(test)]
mod test_support;

use anyhow::{bail, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::app::SnapText;
use crate::capture::{CaptureConfig, StillImageCapture};
use crate::config::{AppConfig, API_KEY_ENV};
use crate::shared::ConsoleSink;
use crate::vision::VisionClient;

/// SnapText - one-shot text recognition via Google Cloud Vision
#[derive(Parser, Debug)]
#[command(name = "snaptext")]
#[command(about = "Capture a still image and print the text Google Cloud Vision finds in it")]
struct Args {
    /// Image file used as the capture device (overrides the config file)
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Cloud Vision API key (overrides the environment and config file)
    #[arg(long)]
    api_key: Option<String>,

    /// Language hint sent with the request; may be repeated
    #[arg(short, long = "language-hint")]
    language_hints: Vec<String>,

    /// JPEG quality used when encoding the capture (1 - 100)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: Option<u8>,

    /// Write the default configuration file and exit
    #[arg(long)]
    init_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout carries only recognized text
    let default_level = if args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = match args.config.clone() {
        Some(path) => path,
        None => storage::default_config_path()?,
    };

    if args.init_config {
        config::save_config(&AppConfig::default(), &config_path)?;
        info!("Wrote default configuration to {:?}", config_path);
        return Ok(());
    }

    let mut config = load_or_default_config(&config_path);
    apply_overrides(&mut config, &args)?;

    let mut capture_config = CaptureConfig::from(&config.capture);
    if let Some(image) = args.image {
        capture_config.source = Some(image);
    }

    let client = VisionClient::new(config.vision);
    let mut app = SnapText::new(StillImageCapture::new(capture_config), client, ConsoleSink);

    app.run_once().await?;

    Ok(())
}

/// Load configuration from file, falling back to defaults
fn load_or_default_config(path: &Path) -> AppConfig {
    if path.exists() {
        match config::load_config(path) {
            Ok(config) => {
                info!("Loaded configuration from {:?}", path);
                return config;
            }
            Err(e) => warn!("Ignoring invalid configuration {:?}: {}", path, e),
        }
    }
    info!("Using default configuration");
    AppConfig::default()
}

/// Fold command-line and environment settings into the loaded config
fn apply_overrides(config: &mut AppConfig, args: &Args) -> Result<()> {
    let env_key = std::env::var(API_KEY_ENV).ok();
    let Some(api_key) =
        config::resolve_api_key(args.api_key.as_deref(), env_key.as_deref(), &config.vision)
    else {
        bail!(
            "No Cloud Vision API key: pass --api-key, set {} or add vision.api_key to the config file",
            API_KEY_ENV
        );
    };
    config.vision.api_key = api_key;

    if !args.language_hints.is_empty() {
        config.vision.language_hints = args.language_hints.clone();
    }
    if let Some(quality) = args.quality {
        config.capture.jpeg_quality = quality;
    }

    Ok(())
}

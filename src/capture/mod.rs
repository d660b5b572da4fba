//! Capture Layer
//!
//! Produces a single JPEG snapshot for recognition. The capture device is
//! anything implementing [`CaptureSource`]; the built-in device reads a
//! still image from disk.

pub mod frame;

use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::CaptureSettings;
use crate::error::CaptureError;
use frame::CapturedFrame;

/// A device able to produce one JPEG-encoded snapshot
pub trait CaptureSource {
    /// Capture one frame and return it as JPEG bytes
    fn capture(&mut self) -> Result<Vec<u8>, CaptureError>;
}

/// Capture configuration
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Still image acting as the capture device
    pub source: Option<PathBuf>,
    /// JPEG quality (1 - 100)
    pub jpeg_quality: u8,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            source: None,
            jpeg_quality: 75,
        }
    }
}

impl From<&CaptureSettings> for CaptureConfig {
    fn from(settings: &CaptureSettings) -> Self {
        Self {
            source: settings.source.as_ref().map(PathBuf::from),
            jpeg_quality: settings.jpeg_quality,
        }
    }
}

/// Capture device backed by an image file
pub struct StillImageCapture {
    config: CaptureConfig,
}

impl StillImageCapture {
    pub fn new(config: CaptureConfig) -> Self {
        Self { config }
    }

    /// Snapshot the source as a raw RGBA frame
    pub fn snapshot(&self) -> Result<CapturedFrame, CaptureError> {
        let path = match &self.config.source {
            Some(path) if path.is_file() => path,
            Some(path) => {
                debug!("Capture source {:?} does not exist", path);
                return Err(CaptureError::Unavailable);
            }
            None => return Err(CaptureError::Unavailable),
        };

        let image = image::open(path).map_err(|e| match e {
            image::ImageError::IoError(io) => CaptureError::Io(io),
            other => CaptureError::Decode(other),
        })?;
        let frame = CapturedFrame::from_image(image);
        debug!("Captured {:?} frame from {:?}", frame.dimensions(), path);

        Ok(frame)
    }
}

impl CaptureSource for StillImageCapture {
    fn capture(&mut self) -> Result<Vec<u8>, CaptureError> {
        let frame = self.snapshot()?;
        let bytes = frame.encode_jpeg(self.config.jpeg_quality)?;
        info!(
            "Byte length: {} (encoded in {:?})",
            bytes.len(),
            frame.timestamp.elapsed()
        );
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_png(dir: &std::path::Path) -> PathBuf {
        let path = dir.join("frame.png");
        let image = RgbImage::from_fn(12, 6, |x, _| Rgb([(x * 20) as u8, 0, 0]));
        image.save(&path).unwrap();
        path
    }

    #[test]
    fn test_capture_without_source_is_unavailable() {
        let mut capture = StillImageCapture::new(CaptureConfig::default());
        assert!(matches!(capture.capture(), Err(CaptureError::Unavailable)));
    }

    #[test]
    fn test_capture_missing_file_is_unavailable() {
        let mut capture = StillImageCapture::new(CaptureConfig {
            source: Some(PathBuf::from("/nonexistent/frame.jpg")),
            ..CaptureConfig::default()
        });
        assert!(matches!(capture.capture(), Err(CaptureError::Unavailable)));
    }

    #[test]
    fn test_capture_encodes_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path());

        let mut capture = StillImageCapture::new(CaptureConfig {
            source: Some(path),
            jpeg_quality: 90,
        });
        let jpeg = capture.capture().unwrap();

        let format = image::guess_format(&jpeg).unwrap();
        assert_eq!(format, image::ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (12, 6));
    }

    #[test]
    fn test_capture_undecodable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.jpg");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let mut capture = StillImageCapture::new(CaptureConfig {
            source: Some(path),
            ..CaptureConfig::default()
        });
        assert!(matches!(capture.capture(), Err(CaptureError::Decode(_))));
    }

    #[test]
    fn test_config_from_settings() {
        let settings = CaptureSettings {
            source: Some("shot.png".to_string()),
            jpeg_quality: 50,
        };
        let config = CaptureConfig::from(&settings);
        assert_eq!(config.source, Some(PathBuf::from("shot.png")));
        assert_eq!(config.jpeg_quality, 50);
    }
}

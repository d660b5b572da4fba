//! Frame data structures for captured still images

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage};
use std::time::Instant;

use crate::error::CaptureError;

/// A captured frame from the capture device
#[derive(Debug)]
pub struct CapturedFrame {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Timestamp when frame was captured
    pub timestamp: Instant,
}

impl CapturedFrame {
    /// Create a new captured frame
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
            timestamp: Instant::now(),
        }
    }

    /// Wrap a decoded image
    pub fn from_image(image: DynamicImage) -> Self {
        let rgba = image.into_rgba8();
        let (width, height) = rgba.dimensions();
        Self::new(rgba.into_raw(), width, height)
    }

    /// Get frame dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Encode the frame as JPEG. Alpha is discarded.
    pub fn encode_jpeg(&self, quality: u8) -> Result<Vec<u8>, CaptureError> {
        if self.width == 0 || self.height == 0 {
            return Err(CaptureError::InvalidFrame(format!(
                "empty frame {}x{}",
                self.width, self.height
            )));
        }

        let rgba = RgbaImage::from_raw(self.width, self.height, self.data.clone()).ok_or_else(
            || {
                CaptureError::InvalidFrame(format!(
                    "{} bytes do not fill a {}x{} RGBA frame",
                    self.data.len(),
                    self.width,
                    self.height
                ))
            },
        )?;
        let rgb = DynamicImage::ImageRgba8(rgba).into_rgb8();

        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100))
            .encode_image(&rgb)
            .map_err(CaptureError::Encode)?;

        Ok(bytes)
    }
}

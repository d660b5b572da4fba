//! Application Coordinator
//!
//! Ties one capture to one recognition call and forwards the result to the
//! output sink.

use tracing::{error, info, warn};

use crate::capture::CaptureSource;
use crate::error::{ApiError, OcrError};
use crate::shared::OutputSink;
use crate::vision::VisionClient;

/// One capture → one Vision API call → one display
pub struct SnapText<C, S> {
    capture: C,
    client: VisionClient,
    sink: S,
}

impl<C: CaptureSource, S: OutputSink> SnapText<C, S> {
    pub fn new(capture: C, client: VisionClient, sink: S) -> Self {
        Self {
            capture,
            client,
            sink,
        }
    }

    /// Run a single capture-and-recognize cycle.
    ///
    /// A capture failure returns before any API call and leaves the sink
    /// untouched. A network failure replaces the sink contents with the
    /// error message. Successful runs display the text, even when empty.
    pub async fn run_once(&mut self) -> Result<String, OcrError> {
        let jpeg = self.capture.capture().map_err(|e| {
            warn!("Capture failed: {}", e);
            OcrError::from(e)
        })?;

        match self.client.recognize_text(&jpeg).await {
            Ok(text) => {
                if text.is_empty() {
                    info!("No text recognized");
                } else {
                    info!("Recognized {} characters", text.chars().count());
                }
                self.sink.display(&text);
                Ok(text)
            }
            Err(ApiError::Network(message)) => {
                error!("Error: {}", message);
                self.sink.display(&format!("Error: {}", message));
                Err(ApiError::Network(message).into())
            }
            Err(e) => {
                error!("Vision API call failed: {}", e);
                Err(e.into())
            }
        }
    }
}

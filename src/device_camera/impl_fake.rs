use crate::device_camera::encode::encode_capture;
use crate::device_camera::interface::{CaptureOptions, CapturedPhoto, DeviceCamera};
use crate::error::PipelineError;
use crate::library::logger::interface::Logger;
use image::{DynamicImage, ImageBuffer, Rgb};
use std::sync::Arc;

enum FakeFrame {
    Synthetic { width: u32, height: u32 },
    Fixed(CapturedPhoto),
    Unavailable(String),
}

pub struct DeviceCameraFake {
    logger: Arc<dyn Logger + Send + Sync>,
    frame: FakeFrame,
}

impl DeviceCameraFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self::with_frame(
            logger,
            FakeFrame::Synthetic {
                width: 320,
                height: 240,
            },
        )
    }

    #[allow(dead_code)]
    pub fn with_photo(logger: Arc<dyn Logger + Send + Sync>, base64: &str) -> Self {
        Self::with_frame(
            logger,
            FakeFrame::Fixed(CapturedPhoto {
                base64: base64.to_string(),
                width: 0,
                height: 0,
            }),
        )
    }

    #[allow(dead_code)]
    pub fn unavailable(logger: Arc<dyn Logger + Send + Sync>, reason: &str) -> Self {
        Self::with_frame(logger, FakeFrame::Unavailable(reason.to_string()))
    }

    fn with_frame(logger: Arc<dyn Logger + Send + Sync>, frame: FakeFrame) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("fake"),
            frame,
        }
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn capture(&self, options: &CaptureOptions) -> Result<CapturedPhoto, PipelineError> {
        let _ = self.logger.info("Capturing photo...");

        let photo = match &self.frame {
            FakeFrame::Synthetic { width, height } => {
                let gradient = ImageBuffer::from_fn(*width, *height, |x, y| {
                    Rgb([
                        (x * 255 / (*width).max(1)) as u8,
                        (y * 255 / (*height).max(1)) as u8,
                        128,
                    ])
                });
                encode_capture(&DynamicImage::ImageRgb8(gradient), options)?
            }
            FakeFrame::Fixed(photo) => photo.clone(),
            FakeFrame::Unavailable(reason) => {
                return Err(PipelineError::Capture(reason.clone()));
            }
        };

        let _ = self.logger.info("Photo captured");
        Ok(photo)
    }
}

use crate::device_camera::encode::encode_capture;
use crate::device_camera::interface::{CaptureOptions, CapturedPhoto, DeviceCamera};
use crate::error::PipelineError;
use crate::library::logger::interface::Logger;
use std::path::PathBuf;
use std::sync::Arc;

/// A camera whose sensor is an image on disk. Useful on machines without a camera.
pub struct DeviceCameraFile {
    logger: Arc<dyn Logger + Send + Sync>,
    path: PathBuf,
}

impl DeviceCameraFile {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, path: PathBuf) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("file"),
            path,
        }
    }
}

impl DeviceCamera for DeviceCameraFile {
    fn capture(&self, options: &CaptureOptions) -> Result<CapturedPhoto, PipelineError> {
        let _ = self
            .logger
            .info(&format!("Capturing photo from {}", self.path.display()));

        let image = image::open(&self.path)
            .map_err(|e| PipelineError::Capture(format!("{}: {}", self.path.display(), e)))?;

        encode_capture(&image, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_console::LoggerConsole;
    use chrono::FixedOffset;
    use image::{ImageBuffer, Rgb};

    fn logger() -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerConsole::new(FixedOffset::east_opt(0).unwrap()))
    }

    fn options() -> CaptureOptions {
        CaptureOptions {
            quality: 0.8,
            base64: true,
            exif: false,
        }
    }

    #[test]
    fn test_capture_re_encodes_source_image() {
        let path = std::env::temp_dir().join("photo_classifier_camera_file_test.png");
        ImageBuffer::from_pixel(6, 3, Rgb([0u8, 0, 255]))
            .save(&path)
            .unwrap();

        let photo = DeviceCameraFile::new(logger(), path.clone())
            .capture(&options())
            .unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!((photo.width, photo.height), (6, 3));
        assert!(photo.base64.starts_with("/9j/"));
    }

    #[test]
    fn test_missing_source_fails_with_capture_error() {
        let camera = DeviceCameraFile::new(logger(), PathBuf::from("/nonexistent/camera.jpg"));

        assert!(matches!(
            camera.capture(&options()),
            Err(PipelineError::Capture(_))
        ));
    }
}

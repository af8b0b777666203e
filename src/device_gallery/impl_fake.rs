use crate::device_gallery::interface::{DeviceGallery, GalleryPick};
use crate::error::PipelineError;
use crate::library::logger::interface::Logger;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// Answers picks from a script, then cancels once the script runs out.
#[allow(dead_code)]
pub struct DeviceGalleryFake {
    logger: Arc<dyn Logger + Send + Sync>,
    script: Mutex<VecDeque<Result<GalleryPick, PipelineError>>>,
}

#[allow(dead_code)]
impl DeviceGalleryFake {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        script: Vec<Result<GalleryPick, PipelineError>>,
    ) -> Self {
        Self {
            logger: logger.with_namespace("gallery").with_namespace("fake"),
            script: Mutex::new(script.into()),
        }
    }
}

impl DeviceGallery for DeviceGalleryFake {
    fn pick(&self) -> Result<GalleryPick, PipelineError> {
        let next = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or(Ok(GalleryPick::Cancelled));
        let _ = self.logger.info(&format!("Pick: {:?}", next));
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_console::LoggerConsole;
    use chrono::FixedOffset;

    #[test]
    fn test_script_then_cancel() {
        let logger = Arc::new(LoggerConsole::new(FixedOffset::east_opt(0).unwrap()));
        let gallery = DeviceGalleryFake::new(
            logger,
            vec![
                Ok(GalleryPick::Picked {
                    uri: "file:///img1.jpg".to_string(),
                }),
                Err(PipelineError::Gallery("picker crashed".to_string())),
            ],
        );

        assert_eq!(
            gallery.pick(),
            Ok(GalleryPick::Picked {
                uri: "file:///img1.jpg".to_string()
            })
        );
        assert!(gallery.pick().is_err());
        assert_eq!(gallery.pick(), Ok(GalleryPick::Cancelled));
    }
}

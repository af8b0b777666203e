use crate::device_gallery::interface::{DeviceGallery, GalleryPick};
use crate::error::PipelineError;
use crate::library::logger::interface::Logger;
use std::path::Path;
use std::sync::Arc;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "JPG", "JPEG"];

/// Native open dialog standing in for the phone's photo library.
pub struct DeviceGalleryFileDialog {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceGalleryFileDialog {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("gallery").with_namespace("file_dialog"),
        }
    }
}

pub fn to_file_uri(path: &Path) -> String {
    format!("file://{}", path.display())
}

impl DeviceGallery for DeviceGalleryFileDialog {
    fn pick(&self) -> Result<GalleryPick, PipelineError> {
        let _ = self.logger.info("Opening picker...");

        let picked = rfd::FileDialog::new()
            .set_title("Galeria")
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file();

        match picked {
            Some(path) => {
                let uri = to_file_uri(&path);
                let _ = self.logger.info(&format!("Picked {}", uri));
                Ok(GalleryPick::Picked { uri })
            }
            None => {
                let _ = self.logger.info("Picker cancelled");
                Ok(GalleryPick::Cancelled)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_file_uri() {
        assert_eq!(
            to_file_uri(Path::new("/home/user/Pictures/dog.jpg")),
            "file:///home/user/Pictures/dog.jpg"
        );
    }
}

use crate::config::CameraSource;
use crate::device_permission::interface::{DevicePermission, PermissionStatus};
use crate::library::logger::interface::Logger;
use std::sync::Arc;

/// Desktops have no runtime permission prompt. The camera counts as granted when its
/// source can actually be opened, the media library always is.
pub struct DevicePermissionDesktop {
    logger: Arc<dyn Logger + Send + Sync>,
    camera_source: CameraSource,
}

impl DevicePermissionDesktop {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, camera_source: CameraSource) -> Self {
        Self {
            logger: logger.with_namespace("permission").with_namespace("desktop"),
            camera_source,
        }
    }
}

impl DevicePermission for DevicePermissionDesktop {
    fn request_camera_permission(&self) -> PermissionStatus {
        let status = match &self.camera_source {
            CameraSource::Synthetic => PermissionStatus::Granted,
            CameraSource::File(path) if path.is_file() => PermissionStatus::Granted,
            CameraSource::File(_) => PermissionStatus::Denied,
        };
        let _ = self.logger.info(&format!(
            "Camera permission for {:?}: {:?}",
            self.camera_source, status
        ));
        status
    }

    fn request_media_library_permission(&self) -> PermissionStatus {
        let _ = self.logger.info("Media library permission: Granted");
        PermissionStatus::Granted
    }
}

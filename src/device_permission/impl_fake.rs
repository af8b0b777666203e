use crate::device_permission::interface::{DevicePermission, PermissionStatus};
use crate::library::logger::interface::Logger;
use std::sync::Arc;

#[allow(dead_code)]
pub struct DevicePermissionFake {
    logger: Arc<dyn Logger + Send + Sync>,
    camera: PermissionStatus,
    media_library: PermissionStatus,
}

#[allow(dead_code)]
impl DevicePermissionFake {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        camera: PermissionStatus,
        media_library: PermissionStatus,
    ) -> Self {
        Self {
            logger: logger.with_namespace("permission").with_namespace("fake"),
            camera,
            media_library,
        }
    }

    pub fn granted(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self::new(logger, PermissionStatus::Granted, PermissionStatus::Granted)
    }
}

impl DevicePermission for DevicePermissionFake {
    fn request_camera_permission(&self) -> PermissionStatus {
        let _ = self
            .logger
            .info(&format!("Camera permission: {:?}", self.camera));
        self.camera
    }

    fn request_media_library_permission(&self) -> PermissionStatus {
        let _ = self
            .logger
            .info(&format!("Media library permission: {:?}", self.media_library));
        self.media_library
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Runtime permission prompts, asked once when the app starts.
pub trait DevicePermission: Send + Sync {
    fn request_camera_permission(&self) -> PermissionStatus;
    fn request_media_library_permission(&self) -> PermissionStatus;
}

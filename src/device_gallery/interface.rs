use crate::error::PipelineError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryPick {
    Picked { uri: String },
    /// The user closed the picker. Not an error.
    Cancelled,
}

pub trait DeviceGallery: Send + Sync {
    fn pick(&self) -> Result<GalleryPick, PipelineError>;
}

use crate::error::PipelineError;

#[derive(Debug, Clone, PartialEq)]
pub struct CaptureOptions {
    /// JPEG quality in `[0, 1]`.
    pub quality: f32,
    /// Return the JPEG inline as base64.
    pub base64: bool,
    /// Keep EXIF metadata. Captures are always re-encoded, so only `false` is honoured.
    pub exif: bool,
}

#[derive(Clone, PartialEq)]
pub struct CapturedPhoto {
    pub base64: String,
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Debug for CapturedPhoto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapturedPhoto")
            .field("base64", &format!("<{} bytes>", self.base64.len()))
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

pub trait DeviceCamera: Send + Sync {
    fn capture(&self, options: &CaptureOptions) -> Result<CapturedPhoto, PipelineError>;
}

use thiserror::Error;

/// Everything that can go wrong between acquiring an image and showing its label.
///
/// Payloads are strings so the error can be cloned into the model and compared in tests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Failed to read file: {0}")]
    FileRead(String),

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to load model: {0}")]
    ModelLoad(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Camera capture failed: {0}")]
    Capture(String),

    #[error("Gallery picker failed: {0}")]
    Gallery(String),
}

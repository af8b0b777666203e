use crate::error::PipelineError;

pub trait FileReader: Send + Sync {
    /// Reads the whole file behind `uri` (a path or a `file://` URI) as base64.
    fn read_as_base64(&self, uri: &str) -> Result<String, PipelineError>;
}

use crate::error::PipelineError;
use crate::file_reader::interface::FileReader;
use base64::{engine::general_purpose, Engine as _};
use std::path::PathBuf;

pub struct FileReaderFs {}

impl FileReaderFs {
    pub fn new() -> Self {
        Self {}
    }
}

pub fn uri_to_path(uri: &str) -> PathBuf {
    PathBuf::from(uri.strip_prefix("file://").unwrap_or(uri))
}

impl FileReader for FileReaderFs {
    fn read_as_base64(&self, uri: &str) -> Result<String, PipelineError> {
        let bytes = std::fs::read(uri_to_path(uri))
            .map_err(|e| PipelineError::FileRead(format!("{}: {}", uri, e)))?;
        Ok(general_purpose::STANDARD.encode(bytes))
    }
}

use crate::error::PipelineError;
use crate::file_reader::interface::FileReader;
use std::collections::HashMap;

/// In-memory files keyed by URI. Anything else is unreadable.
#[allow(dead_code)]
pub struct FileReaderFake {
    files: HashMap<String, String>,
}

#[allow(dead_code)]
impl FileReaderFake {
    pub fn new(files: Vec<(&str, &str)>) -> Self {
        Self {
            files: files
                .into_iter()
                .map(|(uri, base64)| (uri.to_string(), base64.to_string()))
                .collect(),
        }
    }
}

impl FileReader for FileReaderFake {
    fn read_as_base64(&self, uri: &str) -> Result<String, PipelineError> {
        self.files
            .get(uri)
            .cloned()
            .ok_or_else(|| PipelineError::FileRead(format!("{}: No such file", uri)))
    }
}

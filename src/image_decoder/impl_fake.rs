use crate::error::PipelineError;
use crate::image_decoder::interface::{ImageDecoder, PixelTensor};

/// Returns the same outcome for every payload.
#[allow(dead_code)]
pub struct ImageDecoderFake {
    result: Result<PixelTensor, PipelineError>,
}

#[allow(dead_code)]
impl ImageDecoderFake {
    pub fn new(result: Result<PixelTensor, PipelineError>) -> Self {
        Self { result }
    }

    pub fn blank(width: u32, height: u32) -> Self {
        let data = vec![0; width as usize * height as usize * 3];
        Self::new(PixelTensor::new(width, height, data))
    }
}

impl ImageDecoder for ImageDecoderFake {
    fn decode(&self, _base64: &str) -> Result<PixelTensor, PipelineError> {
        self.result.clone()
    }
}

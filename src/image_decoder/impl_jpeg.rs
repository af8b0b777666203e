use crate::error::PipelineError;
use crate::image_decoder::interface::{ImageDecoder, PixelTensor};
use base64::{engine::general_purpose, Engine as _};
use image::ImageFormat;

/// Prefix used when a capture is shown as an inline image.
const DATA_URL_PREFIX: &str = "data:image/jpg;base64,";

pub struct ImageDecoderJpeg {}

impl ImageDecoderJpeg {
    pub fn new() -> Self {
        Self {}
    }
}

impl ImageDecoder for ImageDecoderJpeg {
    fn decode(&self, base64: &str) -> Result<PixelTensor, PipelineError> {
        let payload = base64.strip_prefix(DATA_URL_PREFIX).unwrap_or(base64);
        let payload: String = payload.chars().filter(|c| !c.is_whitespace()).collect();

        let bytes = general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| PipelineError::Decode(format!("invalid base64: {}", e)))?;

        let image = image::load_from_memory_with_format(&bytes, ImageFormat::Jpeg)
            .map_err(|e| PipelineError::Decode(e.to_string()))?;

        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        PixelTensor::new(width, height, rgb.into_raw())
    }
}

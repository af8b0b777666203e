use crate::device_camera::interface::{CaptureOptions, CapturedPhoto};
use crate::error::PipelineError;
use base64::{engine::general_purpose, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

pub fn jpeg_quality(quality: f32) -> u8 {
    (quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8
}

/// Re-encodes a frame as a metadata free JPEG and inlines it as base64.
pub fn encode_capture(
    image: &DynamicImage,
    options: &CaptureOptions,
) -> Result<CapturedPhoto, PipelineError> {
    if !options.base64 {
        return Err(PipelineError::Capture(
            "captures must be requested with inline base64".to_string(),
        ));
    }

    let rgb = image.to_rgb8();
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, jpeg_quality(options.quality))
        .encode_image(&rgb)
        .map_err(|e| PipelineError::Capture(e.to_string()))?;

    Ok(CapturedPhoto {
        base64: general_purpose::STANDARD.encode(&jpeg),
        width: rgb.width(),
        height: rgb.height(),
    })
}

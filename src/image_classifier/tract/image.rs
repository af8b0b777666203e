use crate::error::PipelineError;
use crate::image_decoder::interface::PixelTensor;
use image::{imageops, RgbImage};
use tract_onnx::prelude::*;

/// Per channel `(value / 255 - mean) / std`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    pub mean: [f32; 3],
    pub std: [f32; 3],
}

pub const IMAGENET_NORMALIZATION: Normalization = Normalization {
    mean: [0.485, 0.456, 0.406],
    std: [0.229, 0.224, 0.225],
};

#[allow(dead_code)]
pub const UNIT_NORMALIZATION: Normalization = Normalization {
    mean: [0.0, 0.0, 0.0],
    std: [1.0, 1.0, 1.0],
};

pub fn pixel_tensor_to_image(tensor: &PixelTensor) -> Result<RgbImage, PipelineError> {
    RgbImage::from_raw(tensor.width(), tensor.height(), tensor.data().to_vec())
        .ok_or_else(|| PipelineError::Inference("pixel buffer does not match its size".to_string()))
}

/// Scales to fit inside `width`x`height` keeping the aspect ratio, centered on black.
pub fn resize_image(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    if image.width() == image.height() {
        return imageops::resize(image, width, height, imageops::FilterType::Triangle);
    }

    let (w, h) = (image.width() as f32, image.height() as f32);
    let scale = (width as f32 / w).min(height as f32 / h);
    let new_w = ((w * scale) as u32).clamp(1, width);
    let new_h = ((h * scale) as u32).clamp(1, height);

    let scaled = imageops::resize(image, new_w, new_h, imageops::FilterType::Triangle);

    let mut padded = RgbImage::new(width, height);
    let x_offset = (width - new_w) / 2;
    let y_offset = (height - new_h) / 2;
    imageops::overlay(&mut padded, &scaled, x_offset as i64, y_offset as i64);

    padded
}

/// NCHW float tensor with a batch of one.
fn image_to_tensor(image: &RgbImage, normalization: &Normalization) -> Tensor {
    let (width, height) = (image.width() as usize, image.height() as usize);

    tract_ndarray::Array4::from_shape_fn((1, 3, height, width), |(_, c, y, x)| {
        let value = image.get_pixel(x as u32, y as u32)[c] as f32 / 255.0;
        (value - normalization.mean[c]) / normalization.std[c]
    })
    .into_tensor()
}

pub fn resize_to_tensor(
    tensor: &PixelTensor,
    width: u32,
    height: u32,
    normalization: &Normalization,
) -> Result<Tensor, PipelineError> {
    let image = pixel_tensor_to_image(tensor)?;
    let resized = resize_image(&image, width, height);

    Ok(image_to_tensor(&resized, normalization))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> PixelTensor {
        let data = (0..width * height).flat_map(|_| rgb).collect();
        PixelTensor::new(width, height, data).unwrap()
    }

    #[test]
    fn test_tensor_square() {
        let tensor = resize_to_tensor(&solid(100, 100, [255, 0, 0]), 224, 224, &UNIT_NORMALIZATION)
            .unwrap();
        assert_eq!(tensor.shape(), &[1, 3, 224, 224]);

        let slice = tensor.as_slice::<f32>().unwrap();

        // First value in red channel should be 1.0 (255/255)
        assert_eq!(slice[0], 1.0);

        // First value in green channel should be 0.0
        assert_eq!(slice[224 * 224], 0.0);

        // First value in blue channel should be 0.0
        assert_eq!(slice[2 * 224 * 224], 0.0);
    }

    #[test]
    fn test_tensor_rectangle_is_letterboxed() {
        let tensor = resize_to_tensor(&solid(200, 100, [255, 0, 0]), 224, 224, &UNIT_NORMALIZATION)
            .unwrap();
        assert_eq!(tensor.shape(), &[1, 3, 224, 224]);

        let slice = tensor.as_slice::<f32>().unwrap();

        // red at the center, black padding at the top
        assert_eq!(slice[112 * 224 + 112], 1.0);
        assert_eq!(slice[0], 0.0);
    }

    #[test]
    fn test_imagenet_normalization() {
        let tensor = resize_to_tensor(&solid(10, 10, [128, 128, 128]), 10, 10, &IMAGENET_NORMALIZATION)
            .unwrap();
        let slice = tensor.as_slice::<f32>().unwrap();

        for c in 0..3 {
            let expected = (128.0 / 255.0 - IMAGENET_NORMALIZATION.mean[c])
                / IMAGENET_NORMALIZATION.std[c];
            assert!((slice[c * 100] - expected).abs() < 0.0001);
        }
    }

    #[test]
    fn test_resize_keeps_pixels() {
        let image = RgbImage::from_pixel(3, 3, Rgb([9, 8, 7]));

        let resized = resize_image(&image, 6, 6);

        assert_eq!(resized.dimensions(), (6, 6));
        assert_eq!(resized.get_pixel(5, 5), &Rgb([9, 8, 7]));
    }
}

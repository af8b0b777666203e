use crate::error::PipelineError;

pub const CHANNELS: usize = 3;

/// Decoded RGB pixels, row major, channels interleaved (HWC).
#[derive(Clone, PartialEq)]
pub struct PixelTensor {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelTensor {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, PipelineError> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(PipelineError::Decode(format!(
                "expected {} bytes for {}x{} RGB, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// `[height, width, channels]`
    pub fn shape(&self) -> [usize; 3] {
        [self.height as usize, self.width as usize, CHANNELS]
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

impl std::fmt::Debug for PixelTensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PixelTensor({:?})", self.shape())
    }
}

pub trait ImageDecoder: Send + Sync {
    fn decode(&self, base64: &str) -> Result<PixelTensor, PipelineError>;
}

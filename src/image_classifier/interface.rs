use crate::error::PipelineError;
use crate::image_decoder::interface::PixelTensor;

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub confidence: f32,
}

pub trait ImageClassifier: Send + Sync {
    /// Predictions sorted by descending confidence, at most the model's top-K.
    fn classify(&self, tensor: &PixelTensor) -> Result<Vec<Classification>, PipelineError>;
}

pub fn sort_by_confidence(classifications: &mut [Classification]) {
    classifications.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
}

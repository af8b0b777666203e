use crate::error::PipelineError;
use crate::image_classifier::interface::{sort_by_confidence, Classification, ImageClassifier};
use crate::image_classifier::models::model_config::ModelConfig;
use crate::image_classifier::tract::image::{resize_to_tensor, IMAGENET_NORMALIZATION};
use crate::image_decoder::interface::PixelTensor;
use tract_onnx::prelude::*;

pub struct ImageClassifierTractOnnx {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    labels: Vec<String>,
    config: ModelConfig,
}

impl ImageClassifierTractOnnx {
    pub fn new(config: ModelConfig) -> Result<Self, PipelineError> {
        let labels_text = std::fs::read_to_string(&config.labels_path)
            .map_err(|e| PipelineError::ModelLoad(format!("{}: {}", config.labels_path, e)))?;
        let labels = parse_labels(&labels_text);
        if labels.is_empty() {
            return Err(PipelineError::ModelLoad(format!(
                "{}: no labels",
                config.labels_path
            )));
        }

        let (height, width) = config.input_shape;
        let model = tract_onnx::onnx()
            .model_for_path(&config.onnx_model_path)
            .and_then(|model| {
                model.with_input_fact(
                    0,
                    f32::fact([1, 3, height as usize, width as usize]).into(),
                )
            })
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| PipelineError::ModelLoad(format!("{}: {}", config.onnx_model_path, e)))?;

        Ok(Self {
            model,
            labels,
            config,
        })
    }
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn classify(&self, tensor: &PixelTensor) -> Result<Vec<Classification>, PipelineError> {
        let (height, width) = self.config.input_shape;
        let input = resize_to_tensor(tensor, width, height, &IMAGENET_NORMALIZATION)?;

        let outputs = self
            .model
            .run(tvec!(input.into_tvalue()))
            .map_err(|e| PipelineError::Inference(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| PipelineError::Inference("model produced no output".to_string()))?
            .to_array_view::<f32>()
            .map_err(|e| PipelineError::Inference(e.to_string()))?;

        // [1, classes] or [classes]
        let scores: Vec<f32> = output.iter().copied().collect();
        if scores.is_empty() {
            return Err(PipelineError::Inference("empty output".to_string()));
        }

        let probabilities = if is_distribution(&scores) {
            scores
        } else {
            softmax(&scores)
        };

        Ok(top_k(&probabilities, &self.labels, self.config.top_k))
    }
}

pub fn parse_labels(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_distribution(scores: &[f32]) -> bool {
    let sum: f32 = scores.iter().sum();
    scores.iter().all(|s| (0.0..=1.0).contains(s)) && (sum - 1.0).abs() < 1e-3
}

pub fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.iter().map(|e| e / sum).collect()
}

/// Some exports carry an extra "background" class at index 0.
fn label_for(index: usize, classes: usize, labels: &[String]) -> String {
    let offset = classes.saturating_sub(labels.len());
    index
        .checked_sub(offset)
        .and_then(|i| labels.get(i))
        .cloned()
        .unwrap_or_else(|| format!("class {}", index))
}

pub fn top_k(probabilities: &[f32], labels: &[String], k: usize) -> Vec<Classification> {
    let mut classifications: Vec<Classification> = probabilities
        .iter()
        .enumerate()
        .map(|(index, &confidence)| Classification {
            label: label_for(index, probabilities.len(), labels),
            confidence,
        })
        .collect();

    sort_by_confidence(&mut classifications);
    classifications.truncate(k);
    classifications
}

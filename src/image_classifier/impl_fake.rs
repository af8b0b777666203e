use crate::error::PipelineError;
use crate::image_classifier::interface::{sort_by_confidence, Classification, ImageClassifier};
use crate::image_decoder::interface::PixelTensor;
use crate::library::logger::interface::Logger;
use rand::distr::{Distribution, Uniform};
use std::sync::Arc;

#[allow(dead_code)]
enum FakeOutcome {
    Random,
    Fixed(Result<Vec<Classification>, PipelineError>),
}

#[allow(dead_code)]
pub struct ImageClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
    outcome: FakeOutcome,
}

#[allow(dead_code)]
impl ImageClassifierFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
            outcome: FakeOutcome::Random,
        }
    }

    pub fn with_result(
        logger: Arc<dyn Logger + Send + Sync>,
        result: Result<Vec<Classification>, PipelineError>,
    ) -> Self {
        Self {
            outcome: FakeOutcome::Fixed(result),
            ..Self::new(logger)
        }
    }

    fn random_classifications(&self) -> Result<Vec<Classification>, PipelineError> {
        let objects = vec![
            "golden retriever", "Labrador retriever", "tabby cat", "Persian cat", "sports car",
            "folding chair", "dining table", "goldfinch", "mountain bike", "notebook", "laptop",
            "cellular telephone", "coffee mug", "water bottle", "computer keyboard", "mouse",
            "pot", "wall clock",
        ];

        let mut rng = rand::rng();

        let index_dist = Uniform::new(0, objects.len())
            .map_err(|e| PipelineError::Inference(e.to_string()))?;

        let confidence_dist =
            Uniform::new(0.0f32, 1.0f32).map_err(|e| PipelineError::Inference(e.to_string()))?;

        let mut classifications: Vec<Classification> = (0..3)
            .map(|_| Classification {
                label: objects[index_dist.sample(&mut rng)].to_string(),
                confidence: confidence_dist.sample(&mut rng),
            })
            .collect();

        sort_by_confidence(&mut classifications);

        Ok(classifications)
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(&self, tensor: &PixelTensor) -> Result<Vec<Classification>, PipelineError> {
        let _ = self
            .logger
            .info(&format!("Classifying {:?} with fake classifier...", tensor));

        match &self.outcome {
            FakeOutcome::Random => self.random_classifications(),
            FakeOutcome::Fixed(result) => result.clone(),
        }
    }
}

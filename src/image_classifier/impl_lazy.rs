use crate::error::PipelineError;
use crate::image_classifier::interface::{Classification, ImageClassifier};
use crate::image_decoder::interface::PixelTensor;
use crate::library::logger::interface::Logger;
use std::sync::{Arc, Mutex, PoisonError};

pub type ClassifierLoader =
    Box<dyn Fn() -> Result<Arc<dyn ImageClassifier + Send + Sync>, PipelineError> + Send + Sync>;

/// Loads the wrapped classifier on first use and keeps it for every later call.
///
/// Concurrent first calls wait on the same lock, so the loader runs at most once
/// per successful load. A failed load is not cached and is retried by the next call.
pub struct ImageClassifierLazy {
    logger: Arc<dyn Logger + Send + Sync>,
    loader: ClassifierLoader,
    loaded: Mutex<Option<Arc<dyn ImageClassifier + Send + Sync>>>,
}

impl ImageClassifierLazy {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, loader: ClassifierLoader) -> Self {
        Self {
            logger: logger.with_namespace("image_classifier").with_namespace("lazy"),
            loader,
            loaded: Mutex::new(None),
        }
    }

    pub fn get_or_load(&self) -> Result<Arc<dyn ImageClassifier + Send + Sync>, PipelineError> {
        let mut loaded = self.loaded.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(classifier) = loaded.as_ref() {
            return Ok(Arc::clone(classifier));
        }

        let _ = self.logger.info("Loading model...");
        let classifier = (self.loader)().map_err(|e| {
            let _ = self.logger.error(&format!("Model load failed: {}", e));
            e
        })?;
        let _ = self.logger.info("Model loaded");

        *loaded = Some(Arc::clone(&classifier));
        Ok(classifier)
    }
}

impl ImageClassifier for ImageClassifierLazy {
    fn classify(&self, tensor: &PixelTensor) -> Result<Vec<Classification>, PipelineError> {
        self.get_or_load()?.classify(tensor)
    }
}

use crate::device_camera::interface::CaptureOptions;
use crate::image_classifier::models::model_config::ModelConfig;
use chrono::{FixedOffset, Offset, Utc};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum CameraSource {
    /// Generated frames, for running without any camera hardware.
    Synthetic,
    /// Every capture re-encodes this image.
    File(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayKind {
    Gui,
    Console,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub logger_timezone: FixedOffset,
    pub capture_options: CaptureOptions,
    pub model: ModelConfig,
    pub camera_source: CameraSource,
    pub display: DisplayKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logger_timezone: brasilia_time(),
            capture_options: CaptureOptions {
                quality: 1.0,
                base64: true,
                exif: false,
            },
            model: ModelConfig {
                onnx_model_path: "./models/mobilenetv2-7.onnx".to_string(),
                labels_path: "./models/imagenet_labels.txt".to_string(),
                input_shape: (224, 224),
                top_k: 3,
            },
            camera_source: CameraSource::Synthetic,
            display: DisplayKind::Gui,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `PHOTO_CLASSIFIER_*` variables.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let mut config = Self::default();

        if let Some(path) = lookup("PHOTO_CLASSIFIER_MODEL") {
            config.model.onnx_model_path = path;
        }

        if let Some(path) = lookup("PHOTO_CLASSIFIER_LABELS") {
            config.model.labels_path = path;
        }

        if let Some(top_k) = lookup("PHOTO_CLASSIFIER_TOP_K") {
            let top_k: usize = top_k
                .parse()
                .map_err(|e| format!("PHOTO_CLASSIFIER_TOP_K: {}", e))?;
            if top_k == 0 {
                return Err("PHOTO_CLASSIFIER_TOP_K must be at least 1".into());
            }
            config.model.top_k = top_k;
        }

        if let Some(path) = lookup("PHOTO_CLASSIFIER_CAMERA_IMAGE") {
            config.camera_source = CameraSource::File(PathBuf::from(path));
        }

        if let Some(display) = lookup("PHOTO_CLASSIFIER_DISPLAY") {
            config.display = match display.to_lowercase().as_str() {
                "gui" => DisplayKind::Gui,
                "console" => DisplayKind::Console,
                other => return Err(format!("Unknown display: {}", other).into()),
            };
        }

        Ok(config)
    }
}

fn brasilia_time() -> FixedOffset {
    FixedOffset::west_opt(3 * 3600).unwrap_or_else(|| Utc.fix())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_request_full_quality_base64_without_exif() {
        let config = Config::default();

        assert_eq!(config.capture_options.quality, 1.0);
        assert!(config.capture_options.base64);
        assert!(!config.capture_options.exif);
        assert_eq!(config.camera_source, CameraSource::Synthetic);
        assert_eq!(config.display, DisplayKind::Gui);
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PHOTO_CLASSIFIER_MODEL", "/models/m.onnx"),
            ("PHOTO_CLASSIFIER_LABELS", "/models/labels.txt"),
            ("PHOTO_CLASSIFIER_TOP_K", "5"),
            ("PHOTO_CLASSIFIER_CAMERA_IMAGE", "/tmp/cam.jpg"),
            ("PHOTO_CLASSIFIER_DISPLAY", "Console"),
        ]))
        .unwrap();

        assert_eq!(config.model.onnx_model_path, "/models/m.onnx");
        assert_eq!(config.model.labels_path, "/models/labels.txt");
        assert_eq!(config.model.top_k, 5);
        assert_eq!(
            config.camera_source,
            CameraSource::File(PathBuf::from("/tmp/cam.jpg"))
        );
        assert_eq!(config.display, DisplayKind::Console);
    }

    #[test]
    fn test_env_rejects_bad_values() {
        assert!(Config::from_lookup(lookup_from(&[("PHOTO_CLASSIFIER_TOP_K", "0")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("PHOTO_CLASSIFIER_TOP_K", "x")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("PHOTO_CLASSIFIER_DISPLAY", "tv")])).is_err());
    }
}

use crate::device_display::interface::{Button, DeviceDisplay, View, ViewImage, ViewScreen};
use crate::photo_classifier::core::{Model, PermissionState, PipelineState, Screen};
use std::sync::{Arc, Mutex, PoisonError};

pub const REQUESTING_PERMISSIONS: &str = "Requesting permissions...";
pub const CAMERA_PERMISSION_DENIED: &str =
    "Permission for camera not granted. Please change this in settings.";
pub const LOADING: &str = "Carregando...";
pub const MODEL_READY: &str = "Modelo pronto!";

#[derive(Clone)]
pub struct Render {
    device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
}

impl Render {
    pub fn new(device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>) -> Self {
        Self { device_display }
    }

    pub fn render(&self, model: &Model) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.device_display
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .render(&view(model))
    }
}

/// Failures look exactly like "no result yet".
pub fn status_text(pipeline: &PipelineState) -> String {
    match pipeline {
        PipelineState::Loading { .. } => LOADING.to_string(),
        PipelineState::Ready(result) => result.to_display_string(),
        PipelineState::Idle | PipelineState::Failed(_) => MODEL_READY.to_string(),
    }
}

pub fn view(model: &Model) -> View {
    match &model.screen {
        Screen::PermissionGate => View {
            screen: ViewScreen::PermissionGate,
            status: match model.permissions.camera {
                PermissionState::Unknown => REQUESTING_PERMISSIONS.to_string(),
                PermissionState::Granted | PermissionState::Denied => {
                    CAMERA_PERMISSION_DENIED.to_string()
                }
            },
            image: None,
            buttons: vec![],
        },
        Screen::LiveCamera => View {
            screen: ViewScreen::LiveCamera,
            status: status_text(&model.pipeline),
            image: None,
            buttons: vec![Button::Gallery, Button::TakePhoto],
        },
        Screen::PhotoPreview { base64 } => View {
            screen: ViewScreen::PhotoPreview,
            status: status_text(&model.pipeline),
            image: Some(ViewImage::Base64Jpeg(base64.clone())),
            buttons: vec![Button::Back],
        },
        Screen::GalleryPreview { uri } => View {
            screen: ViewScreen::GalleryPreview,
            status: status_text(&model.pipeline),
            image: Some(ViewImage::Uri(uri.clone())),
            buttons: vec![Button::Back],
        },
    }
}

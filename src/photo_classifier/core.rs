use crate::config::Config;
use crate::device_camera::interface::CapturedPhoto;
use crate::device_display::interface::{Button, DeviceDisplayEvent};
use crate::device_gallery::interface::GalleryPick;
use crate::device_permission::interface::PermissionStatus;
use crate::error::PipelineError;
use crate::image_classifier::interface::Classification;
use crate::image_decoder::interface::PixelTensor;

//
// Model
//

#[derive(Clone, PartialEq, Eq)]
pub enum ImageReference {
    GalleryPath(String),
    CameraCapture(String),
}

impl std::fmt::Debug for ImageReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageReference::GalleryPath(uri) => write!(f, "GalleryPath({:?})", uri),
            ImageReference::CameraCapture(base64) => {
                write!(f, "CameraCapture(<{} bytes>)", base64.len())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionState {
    #[default]
    Unknown,
    Granted,
    Denied,
}

impl From<PermissionStatus> for PermissionState {
    fn from(status: PermissionStatus) -> Self {
        match status {
            PermissionStatus::Granted => PermissionState::Granted,
            PermissionStatus::Denied => PermissionState::Denied,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Permissions {
    pub camera: PermissionState,
    pub media_library: PermissionState,
}

/// Exactly one screen is shown. The preview screens own the active image.
#[derive(Clone, PartialEq, Eq)]
pub enum Screen {
    PermissionGate,
    LiveCamera,
    PhotoPreview { base64: String },
    GalleryPreview { uri: String },
}

impl Screen {
    pub fn image_reference(&self) -> Option<ImageReference> {
        match self {
            Screen::PhotoPreview { base64 } => Some(ImageReference::CameraCapture(base64.clone())),
            Screen::GalleryPreview { uri } => Some(ImageReference::GalleryPath(uri.clone())),
            Screen::PermissionGate | Screen::LiveCamera => None,
        }
    }

    fn from_image_reference(image: &ImageReference) -> Self {
        match image {
            ImageReference::GalleryPath(uri) => Screen::GalleryPreview { uri: uri.clone() },
            ImageReference::CameraCapture(base64) => Screen::PhotoPreview {
                base64: base64.clone(),
            },
        }
    }
}

impl std::fmt::Debug for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Screen::PermissionGate => write!(f, "PermissionGate"),
            Screen::LiveCamera => write!(f, "LiveCamera"),
            Screen::PhotoPreview { base64 } => {
                write!(f, "PhotoPreview(<{} bytes>)", base64.len())
            }
            Screen::GalleryPreview { uri } => write!(f, "GalleryPreview({:?})", uri),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub label: String,
    pub confidence: f32,
}

impl ClassificationResult {
    pub fn to_display_string(&self) -> String {
        format!("{} ({:.3})", self.label, self.confidence)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingStep {
    ReadingFile,
    Decoding,
    Classifying,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineState {
    Idle,
    Loading { generation: u64, step: LoadingStep },
    Ready(ClassificationResult),
    Failed(PipelineError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub permissions: Permissions,
    pub screen: Screen,
    pub pipeline: PipelineState,
    /// Bumped on every acquisition and on "back". Results for older generations are stale.
    pub generation: u64,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            permissions: Permissions::default(),
            screen: Screen::PermissionGate,
            pipeline: PipelineState::Idle,
            generation: 0,
        }
    }
}

//
// Msg
//

#[derive(Debug)]
pub enum Msg {
    PermissionsDone {
        camera: PermissionStatus,
        media_library: PermissionStatus,
    },
    DisplayEvent(DeviceDisplayEvent),
    GalleryPickDone(Result<GalleryPick, PipelineError>),
    TakePhotoDone(Result<CapturedPhoto, PipelineError>),
    FileReadDone {
        generation: u64,
        result: Result<String, PipelineError>,
    },
    DecodeDone {
        generation: u64,
        result: Result<PixelTensor, PipelineError>,
    },
    ClassifyDone {
        generation: u64,
        result: Result<Vec<Classification>, PipelineError>,
    },
}

impl Msg {
    pub fn to_display_string(&self) -> String {
        match self {
            Msg::FileReadDone {
                generation,
                result: Ok(base64),
            } => format!(
                "FileReadDone {{ generation: {}, result: Ok(<{} bytes>) }}",
                generation,
                base64.len()
            ),
            msg => format!("{:?}", msg),
        }
    }
}

//
// Effect
//

#[derive(Clone, PartialEq)]
pub enum Effect {
    RequestPermissions,
    SubscribeToDisplayEvents,
    PickFromGallery,
    TakePhoto,
    ReadFile { generation: u64, uri: String },
    DecodeImage { generation: u64, base64: String },
    ClassifyImage { generation: u64, tensor: PixelTensor },
    LogInfo(String),
    LogError(String),
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::DecodeImage { generation, base64 } => write!(
                f,
                "DecodeImage {{ generation: {}, base64: <{} bytes> }}",
                generation,
                base64.len()
            ),
            Effect::RequestPermissions => write!(f, "RequestPermissions"),
            Effect::SubscribeToDisplayEvents => write!(f, "SubscribeToDisplayEvents"),
            Effect::PickFromGallery => write!(f, "PickFromGallery"),
            Effect::TakePhoto => write!(f, "TakePhoto"),
            Effect::ReadFile { generation, uri } => write!(
                f,
                "ReadFile {{ generation: {}, uri: {:?} }}",
                generation, uri
            ),
            Effect::ClassifyImage { generation, tensor } => write!(
                f,
                "ClassifyImage {{ generation: {}, tensor: {:?} }}",
                generation, tensor
            ),
            Effect::LogInfo(message) => write!(f, "LogInfo({:?})", message),
            Effect::LogError(message) => write!(f, "LogError({:?})", message),
        }
    }
}

//
// Init
//

pub fn init() -> (Model, Vec<Effect>) {
    (
        Model::default(),
        vec![Effect::SubscribeToDisplayEvents, Effect::RequestPermissions],
    )
}

//
// Transition
//

pub fn transition(_config: &Config, model: Model, msg: Msg) -> (Model, Vec<Effect>) {
    match msg {
        Msg::PermissionsDone {
            camera,
            media_library,
        } => {
            let permissions = Permissions {
                camera: camera.into(),
                media_library: media_library.into(),
            };

            match permissions.camera {
                PermissionState::Granted => (
                    Model {
                        permissions,
                        screen: Screen::LiveCamera,
                        ..model
                    },
                    vec![],
                ),
                _ => (
                    Model {
                        permissions,
                        screen: Screen::PermissionGate,
                        ..model
                    },
                    vec![Effect::LogError(
                        PipelineError::PermissionDenied("camera".to_string()).to_string(),
                    )],
                ),
            }
        }

        Msg::DisplayEvent(DeviceDisplayEvent::Pressed(button)) => {
            let on_live_camera = model.screen == Screen::LiveCamera;
            let on_preview = matches!(
                model.screen,
                Screen::PhotoPreview { .. } | Screen::GalleryPreview { .. }
            );

            match button {
                Button::Gallery if on_live_camera => (model, vec![Effect::PickFromGallery]),
                Button::TakePhoto if on_live_camera => (model, vec![Effect::TakePhoto]),
                Button::Back if on_preview => go_back(model),
                _ => (model, vec![]),
            }
        }

        Msg::GalleryPickDone(result) => match result {
            Ok(GalleryPick::Picked { uri }) => acquire(model, ImageReference::GalleryPath(uri)),
            Ok(GalleryPick::Cancelled) => (model, vec![]),
            Err(error) => (model, vec![Effect::LogError(error.to_string())]),
        },

        Msg::TakePhotoDone(result) => match result {
            Ok(photo) => acquire(model, ImageReference::CameraCapture(photo.base64)),
            Err(error) => (model, vec![Effect::LogError(error.to_string())]),
        },

        Msg::FileReadDone { generation, result } => {
            if !is_current(&model, generation, LoadingStep::ReadingFile) {
                return discard_stale(model, generation, "file read");
            }
            match result {
                Ok(base64) => (
                    loading(model, generation, LoadingStep::Decoding),
                    vec![Effect::DecodeImage { generation, base64 }],
                ),
                Err(error) => fail(model, error),
            }
        }

        Msg::DecodeDone { generation, result } => {
            if !is_current(&model, generation, LoadingStep::Decoding) {
                return discard_stale(model, generation, "decode");
            }
            match result {
                Ok(tensor) => (
                    loading(model, generation, LoadingStep::Classifying),
                    vec![Effect::ClassifyImage { generation, tensor }],
                ),
                Err(error) => fail(model, error),
            }
        }

        Msg::ClassifyDone { generation, result } => {
            if !is_current(&model, generation, LoadingStep::Classifying) {
                return discard_stale(model, generation, "classification");
            }
            match result.and_then(top_prediction) {
                Ok(result) => (
                    Model {
                        pipeline: PipelineState::Ready(result),
                        ..model
                    },
                    vec![],
                ),
                Err(error) => fail(model, error),
            }
        }
    }
}

/// A new image supersedes whatever was being classified.
fn acquire(model: Model, image: ImageReference) -> (Model, Vec<Effect>) {
    if model.screen == Screen::PermissionGate {
        return (model, vec![]);
    }

    let generation = model.generation + 1;
    let screen = Screen::from_image_reference(&image);

    let (step, effect) = match image {
        ImageReference::GalleryPath(uri) => {
            (LoadingStep::ReadingFile, Effect::ReadFile { generation, uri })
        }
        ImageReference::CameraCapture(base64) => {
            (LoadingStep::Decoding, Effect::DecodeImage { generation, base64 })
        }
    };

    (
        Model {
            screen,
            pipeline: PipelineState::Loading { generation, step },
            generation,
            ..model
        },
        vec![effect],
    )
}

fn go_back(model: Model) -> (Model, Vec<Effect>) {
    (
        Model {
            screen: Screen::LiveCamera,
            pipeline: PipelineState::Idle,
            generation: model.generation + 1,
            ..model
        },
        vec![],
    )
}

fn is_current(model: &Model, generation: u64, expected: LoadingStep) -> bool {
    matches!(
        model.pipeline,
        PipelineState::Loading { generation: g, step } if g == generation && step == expected
    ) && model.generation == generation
}

fn loading(model: Model, generation: u64, step: LoadingStep) -> Model {
    Model {
        pipeline: PipelineState::Loading { generation, step },
        ..model
    }
}

fn fail(model: Model, error: PipelineError) -> (Model, Vec<Effect>) {
    let message = error.to_string();
    (
        Model {
            pipeline: PipelineState::Failed(error),
            ..model
        },
        vec![Effect::LogError(message)],
    )
}

fn discard_stale(model: Model, generation: u64, what: &str) -> (Model, Vec<Effect>) {
    let message = format!(
        "Discarding stale {} for generation {} (current {})",
        what, generation, model.generation
    );
    (model, vec![Effect::LogInfo(message)])
}

fn top_prediction(
    classifications: Vec<Classification>,
) -> Result<ClassificationResult, PipelineError> {
    let top = classifications
        .into_iter()
        .next()
        .ok_or_else(|| PipelineError::Inference("no predictions".to_string()))?;

    if !(0.0..=1.0).contains(&top.confidence) {
        return Err(PipelineError::Inference(format!(
            "confidence {} outside [0, 1]",
            top.confidence
        )));
    }

    Ok(ClassificationResult {
        label: top.label,
        confidence: top.confidence,
    })
}

use std::error::Error;
use std::sync::mpsc::Receiver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewScreen {
    PermissionGate,
    LiveCamera,
    PhotoPreview,
    GalleryPreview,
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewImage {
    Base64Jpeg(String),
    Uri(String),
}

impl std::fmt::Debug for ViewImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewImage::Base64Jpeg(base64) => write!(f, "Base64Jpeg(<{} bytes>)", base64.len()),
            ViewImage::Uri(uri) => write!(f, "Uri({:?})", uri),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Gallery,
    TakePhoto,
    Back,
}

impl Button {
    pub fn label(&self) -> &'static str {
        match self {
            Button::Gallery => "Galeria",
            Button::TakePhoto => "Tirar Foto",
            Button::Back => "Voltar",
        }
    }
}

/// Everything a display needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub screen: ViewScreen,
    pub status: String,
    pub image: Option<ViewImage>,
    pub buttons: Vec<Button>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceDisplayEvent {
    Pressed(Button),
}

pub trait DeviceDisplay: Send + Sync {
    fn render(&mut self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// A new stream of user input. Every subscriber sees every event.
    fn events(&self) -> Receiver<DeviceDisplayEvent>;
}

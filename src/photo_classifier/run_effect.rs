use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::DeviceDisplay;
use crate::device_gallery::interface::DeviceGallery;
use crate::device_permission::interface::DevicePermission;
use crate::file_reader::interface::FileReader;
use crate::image_classifier::interface::ImageClassifier;
use crate::image_decoder::interface::ImageDecoder;
use crate::library::logger::interface::Logger;
use crate::photo_classifier::core::{Effect, Msg};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone)]
pub struct RunEffect {
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub device_permission: Arc<dyn DevicePermission + Send + Sync>,
    pub device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    pub device_gallery: Arc<dyn DeviceGallery + Send + Sync>,
    pub device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    pub file_reader: Arc<dyn FileReader + Send + Sync>,
    pub image_decoder: Arc<dyn ImageDecoder + Send + Sync>,
    pub image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
}

impl RunEffect {
    pub fn run_effect(&self, effect: Effect, msg_sender: Sender<Msg>) {
        match effect {
            Effect::LogInfo(message) => {
                let _ = self.logger.info(&message);
            }
            Effect::LogError(message) => {
                let _ = self.logger.error(&message);
            }
            effect => {
                let _ = self.logger.info(&format!("Running effect: {:?}", effect));
                self.run_device_effect(effect, msg_sender);
            }
        }
    }

    fn run_device_effect(&self, effect: Effect, msg_sender: Sender<Msg>) {
        match effect {
            Effect::SubscribeToDisplayEvents => {
                let events = self
                    .device_display
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .events();
                for event in events {
                    if msg_sender.send(Msg::DisplayEvent(event)).is_err() {
                        break;
                    }
                }
            }
            Effect::RequestPermissions => {
                let camera = self.device_permission.request_camera_permission();
                let media_library = self.device_permission.request_media_library_permission();
                let _ = msg_sender.send(Msg::PermissionsDone {
                    camera,
                    media_library,
                });
            }
            Effect::PickFromGallery => {
                let picked = self.device_gallery.pick();
                let _ = msg_sender.send(Msg::GalleryPickDone(picked));
            }
            Effect::TakePhoto => {
                let photo = self.device_camera.capture(&self.config.capture_options);
                let _ = msg_sender.send(Msg::TakePhotoDone(photo));
            }
            Effect::ReadFile { generation, uri } => {
                let result = self.file_reader.read_as_base64(&uri);
                let _ = msg_sender.send(Msg::FileReadDone { generation, result });
            }
            Effect::DecodeImage { generation, base64 } => {
                let result = self.image_decoder.decode(&base64);
                let _ = msg_sender.send(Msg::DecodeDone { generation, result });
            }
            Effect::ClassifyImage { generation, tensor } => {
                let result = self.image_classifier.classify(&tensor);
                let _ = msg_sender.send(Msg::ClassifyDone { generation, result });
            }
            Effect::LogInfo(_) | Effect::LogError(_) => {}
        }
    }
}

use config::{CameraSource, Config, DisplayKind};
use device_camera::{
    impl_fake::DeviceCameraFake, impl_file::DeviceCameraFile, interface::DeviceCamera,
};
use device_display::{
    impl_console::DeviceDisplayConsole, impl_gui::DeviceDisplayGui, interface::DeviceDisplay,
};
use device_gallery::impl_file_dialog::DeviceGalleryFileDialog;
use device_permission::impl_desktop::DevicePermissionDesktop;
use file_reader::impl_fs::FileReaderFs;
use image_classifier::{
    impl_lazy::ImageClassifierLazy, impl_tract_onnx::ImageClassifierTractOnnx,
    interface::ImageClassifier,
};
use image_decoder::impl_jpeg::ImageDecoderJpeg;
use library::logger::{impl_console::LoggerConsole, interface::Logger};
use photo_classifier::{main::PhotoClassifier, run_effect::RunEffect};
use std::sync::{Arc, Mutex};
use std::thread;

mod config;
mod device_camera;
mod device_display;
mod device_gallery;
mod device_permission;
mod error;
mod file_reader;
mod image_classifier;
mod image_decoder;
mod library;
mod photo_classifier;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env()?;

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let device_camera: Arc<dyn DeviceCamera + Send + Sync> = match &config.camera_source {
        CameraSource::Synthetic => Arc::new(DeviceCameraFake::new(logger.clone())),
        CameraSource::File(path) => Arc::new(DeviceCameraFile::new(logger.clone(), path.clone())),
    };

    let model_config = config.model.clone();
    let image_classifier: Arc<dyn ImageClassifier + Send + Sync> = Arc::new(
        ImageClassifierLazy::new(
            logger.clone(),
            Box::new(move || {
                let classifier = ImageClassifierTractOnnx::new(model_config.clone())?;
                Ok(Arc::new(classifier) as Arc<dyn ImageClassifier + Send + Sync>)
            }),
        ),
    );

    let run_effect = |device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>| RunEffect {
        config: config.clone(),
        logger: logger.clone(),
        device_permission: Arc::new(DevicePermissionDesktop::new(
            logger.clone(),
            config.camera_source.clone(),
        )),
        device_camera: device_camera.clone(),
        device_gallery: Arc::new(DeviceGalleryFileDialog::new(logger.clone())),
        device_display,
        file_reader: Arc::new(FileReaderFs::new()),
        image_decoder: Arc::new(ImageDecoderJpeg::new()),
        image_classifier: image_classifier.clone(),
    };

    match config.display {
        DisplayKind::Console => {
            let photo_classifier =
                PhotoClassifier::new(run_effect(Arc::new(Mutex::new(DeviceDisplayConsole::new()))));

            photo_classifier.run()
        }
        DisplayKind::Gui => {
            // The window owns the main thread, so the controller runs beside it.
            let device_display = DeviceDisplayGui::new();
            let photo_classifier =
                PhotoClassifier::new(run_effect(Arc::new(Mutex::new(device_display.handle()))));

            let controller_logger = logger.with_namespace("main");
            thread::spawn(move || {
                if let Err(e) = photo_classifier.run() {
                    let _ = controller_logger.error(&format!("Controller stopped: {}", e));
                }
            });

            device_display.run()
        }
    }
}

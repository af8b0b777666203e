use crate::device_display::interface::{
    DeviceDisplay, DeviceDisplayEvent, View, ViewImage, ViewScreen,
};
use crate::device_display::subscribers::Subscribers;
use crate::file_reader::impl_fs::uri_to_path;
use base64::{engine::general_purpose, Engine as _};
use eframe::egui;
use std::error::Error;
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex, PoisonError};

struct PreviewTexture {
    source: ViewImage,
    texture: Option<egui::TextureHandle>,
}

struct DisplayWindow {
    view: Arc<Mutex<View>>,
    context: Arc<Mutex<Option<egui::Context>>>,
    subscribers: Arc<Subscribers>,
    preview: Option<PreviewTexture>,
}

fn load_color_image(image: &ViewImage) -> Result<egui::ColorImage, Box<dyn Error + Send + Sync>> {
    let decoded = match image {
        ViewImage::Base64Jpeg(base64) => {
            let bytes = general_purpose::STANDARD.decode(base64)?;
            image::load_from_memory(&bytes)?
        }
        ViewImage::Uri(uri) => image::open(uri_to_path(uri))?,
    };
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

impl DisplayWindow {
    fn preview_texture(
        &mut self,
        ctx: &egui::Context,
        image: &ViewImage,
    ) -> Option<egui::TextureHandle> {
        let stale = self
            .preview
            .as_ref()
            .map_or(true, |preview| &preview.source != image);

        if stale {
            let texture = load_color_image(image)
                .ok()
                .map(|color_image| ctx.load_texture("preview", color_image, Default::default()));
            self.preview = Some(PreviewTexture {
                source: image.clone(),
                texture,
            });
        }

        self.preview.as_ref().and_then(|p| p.texture.clone())
    }
}

impl eframe::App for DisplayWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        {
            let mut context = self.context.lock().unwrap_or_else(PoisonError::into_inner);
            if context.is_none() {
                *context = Some(ctx.clone());
            }
        }

        let view = self
            .view
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let texture = view
            .image
            .as_ref()
            .and_then(|image| self.preview_texture(ctx, image));

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);

                match view.screen {
                    ViewScreen::LiveCamera => {
                        let rect = ui.available_rect_before_wrap();
                        let height = (rect.height() - 120.0).max(0.0);
                        let (camera_rect, _) = ui.allocate_exact_size(
                            egui::vec2(rect.width(), height),
                            egui::Sense::hover(),
                        );
                        ui.painter()
                            .rect_filled(camera_rect, 0.0, egui::Color32::from_rgb(30, 30, 30));
                    }
                    ViewScreen::PhotoPreview | ViewScreen::GalleryPreview => match &texture {
                        Some(texture) => {
                            let max = egui::vec2(ui.available_width(), ui.available_height() - 120.0);
                            let size = texture.size_vec2();
                            let scale = (max.x / size.x).min(max.y / size.y).min(1.0).max(0.0);
                            ui.image((texture.id(), size * scale));
                        }
                        None => {
                            ui.label("Imagem indisponível");
                        }
                    },
                    ViewScreen::PermissionGate => {}
                }

                ui.add_space(10.0);
                ui.label(egui::RichText::new(&view.status).size(20.0));
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    for button in &view.buttons {
                        if ui.button(button.label()).clicked() {
                            self.subscribers.publish(DeviceDisplayEvent::Pressed(*button));
                        }
                    }
                });
            });
        });
    }
}

/// egui window. `run` must be called on the main thread and blocks until the window closes.
pub struct DeviceDisplayGui {
    view: Arc<Mutex<View>>,
    context: Arc<Mutex<Option<egui::Context>>>,
    subscribers: Arc<Subscribers>,
}

impl DeviceDisplayGui {
    pub fn new() -> Self {
        Self {
            view: Arc::new(Mutex::new(View {
                screen: ViewScreen::PermissionGate,
                status: String::new(),
                image: None,
                buttons: vec![],
            })),
            context: Arc::new(Mutex::new(None)),
            subscribers: Arc::new(Subscribers::default()),
        }
    }

    /// A second handle onto the same window state.
    pub fn handle(&self) -> Self {
        Self {
            view: Arc::clone(&self.view),
            context: Arc::clone(&self.context),
            subscribers: Arc::clone(&self.subscribers),
        }
    }

    pub fn run(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default().with_inner_size([420.0, 720.0]),
            ..Default::default()
        };

        let window = DisplayWindow {
            view: self.view,
            context: self.context,
            subscribers: self.subscribers,
            preview: None,
        };

        eframe::run_native(
            "Photo Classifier",
            options,
            Box::new(|_cc| Box::new(window)),
        )
        .map_err(|e| e.to_string().into())
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn render(&mut self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>> {
        *self.view.lock().unwrap_or_else(PoisonError::into_inner) = view.clone();

        if let Some(context) = self
            .context
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            context.request_repaint();
        }

        Ok(())
    }

    fn events(&self) -> Receiver<DeviceDisplayEvent> {
        self.subscribers.subscribe()
    }
}

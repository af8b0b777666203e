use crate::device_display::interface::{Button, DeviceDisplay, DeviceDisplayEvent, View};
use crate::device_display::subscribers::Subscribers;
use crate::library::logger::interface::Logger;
use std::error::Error;
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex, PoisonError};

/// Remembers every rendered view and lets tests press buttons.
#[derive(Clone)]
#[allow(dead_code)]
pub struct DeviceDisplayFake {
    logger: Arc<dyn Logger + Send + Sync>,
    views: Arc<Mutex<Vec<View>>>,
    subscribers: Arc<Subscribers>,
}

#[allow(dead_code)]
impl DeviceDisplayFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("display").with_namespace("fake"),
            views: Arc::new(Mutex::new(vec![])),
            subscribers: Arc::new(Subscribers::default()),
        }
    }

    pub fn press(&self, button: Button) {
        let _ = self.logger.info(&format!("press({:?})", button));
        self.subscribers.publish(DeviceDisplayEvent::Pressed(button));
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribers.count() > 0
    }

    pub fn views(&self) -> Vec<View> {
        self.views
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last_view(&self) -> Option<View> {
        self.views().last().cloned()
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn render(&mut self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger.info(&format!("render({:?})", view))?;
        self.views
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(view.clone());
        Ok(())
    }

    fn events(&self) -> Receiver<DeviceDisplayEvent> {
        self.subscribers.subscribe()
    }
}

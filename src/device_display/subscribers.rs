use crate::device_display::interface::DeviceDisplayEvent;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Mutex, PoisonError};

#[derive(Default)]
pub struct Subscribers {
    senders: Mutex<Vec<Sender<DeviceDisplayEvent>>>,
}

impl Subscribers {
    pub fn subscribe(&self) -> Receiver<DeviceDisplayEvent> {
        let (sender, receiver) = channel();
        self.senders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sender);
        receiver
    }

    pub fn count(&self) -> usize {
        self.senders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Drops subscribers whose receiver is gone.
    pub fn publish(&self, event: DeviceDisplayEvent) {
        self.senders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|sender| sender.send(event).is_ok());
    }
}

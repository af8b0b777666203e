use crate::device_display::interface::{Button, DeviceDisplay, DeviceDisplayEvent, View};
use crate::device_display::subscribers::Subscribers;
use std::error::Error;
use std::io::BufRead;
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Once};

/// Prints each view as a box and reads commands from stdin: `g`, `t`, `b`.
pub struct DeviceDisplayConsole {
    subscribers: Arc<Subscribers>,
    stdin_reader: Once,
}

impl DeviceDisplayConsole {
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(Subscribers::default()),
            stdin_reader: Once::new(),
        }
    }
}

pub fn parse_command(line: &str) -> Option<Button> {
    let command = line.trim().to_lowercase();
    [Button::Gallery, Button::TakePhoto, Button::Back]
        .into_iter()
        .find(|button| {
            command == button.label().to_lowercase()
                || command == shortcut(*button).to_string()
        })
}

fn shortcut(button: Button) -> char {
    match button {
        Button::Gallery => 'g',
        Button::TakePhoto => 't',
        Button::Back => 'b',
    }
}

pub fn format_view(view: &View) -> Vec<String> {
    let mut lines = vec![format!("{:?}", view.screen)];
    if let Some(image) = &view.image {
        lines.push(format!("[{:?}]", image));
    }
    lines.push(view.status.clone());
    if !view.buttons.is_empty() {
        lines.push(
            view.buttons
                .iter()
                .map(|b| format!("({}) {}", shortcut(*b), b.label()))
                .collect::<Vec<_>>()
                .join("  "),
        );
    }

    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let mut boxed = vec![format!("┌{}┐", "─".repeat(width))];
    boxed.extend(
        lines
            .iter()
            .map(|l| format!("│{}{}│", l, " ".repeat(width - l.chars().count()))),
    );
    boxed.push(format!("└{}┘", "─".repeat(width)));
    boxed
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn render(&mut self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>> {
        for line in format_view(view) {
            println!("{}", line);
        }
        Ok(())
    }

    fn events(&self) -> Receiver<DeviceDisplayEvent> {
        let receiver = self.subscribers.subscribe();

        let subscribers = Arc::clone(&self.subscribers);
        self.stdin_reader.call_once(|| {
            std::thread::spawn(move || {
                for line in std::io::stdin().lock().lines().map_while(Result::ok) {
                    if let Some(button) = parse_command(&line) {
                        subscribers.publish(DeviceDisplayEvent::Pressed(button));
                    }
                }
            });
        });

        receiver
    }
}

use crate::config::Config;
use crate::library::logger::interface::Logger;
use crate::library::state_machine::StateMachine;
use crate::photo_classifier::core::{init, transition, Effect, Model, Msg};
use crate::photo_classifier::render::Render;
use crate::photo_classifier::run_effect::RunEffect;
use std::sync::mpsc::Sender;
use std::sync::Arc;

pub struct PhotoClassifier {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    render: Render,
    run_effect: RunEffect,
}

impl PhotoClassifier {
    pub fn new(run_effect: RunEffect) -> Self {
        Self {
            config: run_effect.config.clone(),
            logger: run_effect.logger.with_namespace("photo_classifier"),
            render: Render::new(Arc::clone(&run_effect.device_display)),
            run_effect,
        }
    }

    fn transition(&self, model: Model, msg: Msg) -> (Model, Vec<Effect>) {
        let old_model = format!("{:?}", model);
        let msg_display = msg.to_display_string();

        let (new_model, effects) = transition(&self.config, model, msg);

        let _ = self.logger.info(&format!(
            "\nold model:\n\t{}\n\nmsg:\n\t{}\n\nnew model:\n\t{:?}\n\neffects:\n\t{:?}",
            old_model, msg_display, new_model, effects
        ));

        (new_model, effects)
    }

    fn render(&self, model: &Model) {
        if let Err(e) = self.render.render(model) {
            let _ = self.logger.error(&format!("Render failed: {}", e));
        }
    }

    /// Blocks the calling thread for the lifetime of the app.
    pub fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let this = Arc::new(self);
        let transition_this = Arc::clone(&this);
        let render_this = Arc::clone(&this);
        let effect_this = Arc::clone(&this);

        StateMachine::new(
            init(),
            move |model: Model, msg: Msg| transition_this.transition(model, msg),
            move |model: &Model| render_this.render(model),
            move |effect: Effect, msg_sender: Sender<Msg>| {
                effect_this.run_effect.run_effect(effect, msg_sender)
            },
        )
        .run()
    }
}

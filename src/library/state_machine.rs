use std::marker::PhantomData;
use std::sync::mpsc::{channel, Sender};
use std::sync::Arc;

/// Elm style runner: one thread owns the state and applies `transition_fn` to each
/// message, every effect runs on its own thread and answers with messages.
pub struct StateMachine<TState, TMsg, TEffect, T, R, E>
where
    T: Fn(TState, TMsg) -> (TState, Vec<TEffect>) + Send + Sync,
    R: Fn(&TState) + Send + Sync,
    E: Fn(TEffect, Sender<TMsg>) + Send + Sync,
{
    pub init: (TState, Vec<TEffect>),
    pub transition_fn: Arc<T>,
    pub render_fn: Arc<R>,
    pub run_effect_fn: Arc<E>,
    _msg: PhantomData<TMsg>,
}

impl<TState, TMsg, TEffect, T, R, E> StateMachine<TState, TMsg, TEffect, T, R, E>
where
    TState: Send + 'static,
    TMsg: Send + 'static,
    TEffect: Send + 'static,
    T: Fn(TState, TMsg) -> (TState, Vec<TEffect>) + Send + Sync + 'static,
    R: Fn(&TState) + Send + Sync + 'static,
    E: Fn(TEffect, Sender<TMsg>) + Send + Sync + 'static,
{
    pub fn new(
        init: (TState, Vec<TEffect>),
        transition_fn: T,
        render_fn: R,
        run_effect_fn: E,
    ) -> Self {
        Self {
            init,
            transition_fn: Arc::new(transition_fn),
            render_fn: Arc::new(render_fn),
            run_effect_fn: Arc::new(run_effect_fn),
            _msg: PhantomData,
        }
    }

    pub fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (msg_sender, msg_receiver) = channel();
        let (mut state, effects) = self.init;

        (self.render_fn)(&state);
        Self::spawn_effects(&self.run_effect_fn, &msg_sender, effects);

        loop {
            match msg_receiver.recv() {
                Ok(msg) => {
                    let (new_state, new_effects) = (self.transition_fn)(state, msg);
                    state = new_state;
                    (self.render_fn)(&state);
                    Self::spawn_effects(&self.run_effect_fn, &msg_sender, new_effects);
                }
                Err(e) => {
                    return Err(Box::new(e));
                }
            }
        }
    }

    fn spawn_effects(run_effect_fn: &Arc<E>, msg_sender: &Sender<TMsg>, effects: Vec<TEffect>) {
        for effect in effects {
            let effect_sender = msg_sender.clone();
            let run_effect_fn = Arc::clone(run_effect_fn);
            std::thread::spawn(move || {
                run_effect_fn(effect, effect_sender);
            });
        }
    }
}

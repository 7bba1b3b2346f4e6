use tracing::trace;

use super::{EmitFn, Sink};

/// Forwards every event unchanged to the downstream callback
pub struct EventOut<E> {
    callback: Option<EmitFn<E>>,
}

impl<E> Default for EventOut<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventOut<E> {
    /// A forwarder with no callback yet. Events are dropped until one is set.
    pub fn new() -> Self {
        Self { callback: None }
    }

    /// A forwarder handing every event to `callback`
    pub fn with_callback(callback: impl FnMut(E) + Send + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }
}

impl<E> Sink<E> for EventOut<E> {
    type Output = E;

    fn add_event(&mut self, event: E) {
        match self.callback.as_mut() {
            Some(callback) => callback(event),
            None => trace!("No callback registered, dropping event"),
        }
    }

    fn on_emit(&mut self, callback: EmitFn<E>) {
        self.callback = Some(callback);
    }
}

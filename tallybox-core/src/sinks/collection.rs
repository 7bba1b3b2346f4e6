use super::{EmitFn, Sink};
use crate::{
    accumulator::{Accumulator, Collection},
    collector::{Collector, CollectorSettings},
    types::{Event, GroupKey, WindowKey},
    window::ConfigError,
};

/// Collects events into windowed buckets and forwards every bucket the
/// embedded [Collector] emits to the downstream callback.
///
/// Buckets are forwarded as owned copies, so nothing downstream can modify
/// the collector's state.
pub struct CollectionOut<E, A = Collection<E>> {
    collector: Collector<E, A>,
}

impl<E, A> CollectionOut<E, A>
where
    E: Event + 'static,
    A: Accumulator<E> + Clone + Send + 'static,
{
    /// Forward everything `collector` emits. Any trigger already set on it
    /// is replaced once [Sink::on_emit] is called.
    pub fn new(collector: Collector<E, A>) -> Self {
        Self { collector }
    }

    /// Build the embedded collector from a pipeline's settings
    pub fn from_settings(settings: &CollectorSettings) -> Result<Self, ConfigError> {
        Ok(Self::new(Collector::from_settings(settings)?))
    }

    /// Group events in every window by `group_by`
    pub fn group_by(self, group_by: impl Fn(&E) -> Option<GroupKey> + Send + 'static) -> Self {
        Self {
            collector: self.collector.group_by(group_by),
        }
    }

    /// Emit every live bucket of the embedded collector
    pub fn flush(&mut self) {
        self.collector.flush_collections();
    }

    /// The embedded collector
    pub fn collector(&self) -> &Collector<E, A> {
        &self.collector
    }
}

impl<E, A> Sink<E> for CollectionOut<E, A>
where
    E: Event + 'static,
    A: Accumulator<E> + Clone + Send + 'static,
{
    type Output = (A, WindowKey);

    fn add_event(&mut self, event: E) {
        self.collector.add_event(event);
    }

    fn on_emit(&mut self, mut callback: EmitFn<(A, WindowKey)>) {
        self.collector
            .set_trigger(move |accumulator: &A, window: &WindowKey| {
                callback((accumulator.clone(), window.clone()))
            });
    }
}

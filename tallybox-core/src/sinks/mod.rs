//! Sinks consuming events or the buckets a collector emits
mod collection;
mod console;
mod forward;
mod vec_sink;

pub use collection::CollectionOut;
pub use console::ConsoleOut;
pub use forward::EventOut;
pub use vec_sink::VecSink;

/// Callback a sink hands its output to
pub type EmitFn<T> = Box<dyn FnMut(T) + Send>;

/// The end of a pipeline.
///
/// A sink receives events one at a time and may hand something downstream
/// through the callback registered with [Sink::on_emit].
pub trait Sink<E> {
    /// What this sink hands to its downstream callback
    type Output;

    /// Consume a single event
    fn add_event(&mut self, event: E);

    /// Replace the downstream callback
    fn on_emit(&mut self, callback: EmitFn<Self::Output>);

    /// Called when no more events will arrive. Calling this more than once
    /// must be harmless.
    fn done(&mut self) {}
}

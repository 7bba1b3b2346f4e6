use std::{
    fmt::Debug,
    io::{Stdout, Write},
};

use super::{EmitFn, Sink};
use crate::errorhandling::OrFatal;

/// Prints every event on its own line, prefixed with `OUT:`.
///
/// This sink never calls its downstream callback. It accepts one anyway, so
/// it can stand in for any other event sink.
pub struct ConsoleOut<E, W = Stdout> {
    writer: W,
    callback: Option<EmitFn<E>>,
}

impl<E> ConsoleOut<E, Stdout> {
    /// A sink printing to standard output
    pub fn new() -> Self {
        Self::with_writer(std::io::stdout())
    }
}

impl<E> Default for ConsoleOut<E, Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, W: Write> ConsoleOut<E, W> {
    /// A sink printing to `writer`
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            callback: None,
        }
    }

    /// Take back the writer
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// True if a callback was registered, even though it is never called
    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }
}

impl<E, W> Sink<E> for ConsoleOut<E, W>
where
    E: Debug,
    W: Write,
{
    type Output = E;

    fn add_event(&mut self, event: E) {
        writeln!(self.writer, "OUT: {event:?}").or_fatal("writing to diagnostic stream");
    }

    fn on_emit(&mut self, callback: EmitFn<E>) {
        self.callback = Some(callback);
    }

    fn done(&mut self) {
        self.writer.flush().or_fatal("flushing diagnostic stream");
    }
}

//! Handling of errors no caller could act upon.

use eyre::WrapErr;

/// Extension for results whose error leaves the process nothing sensible to
/// continue with, like a diagnostic stream which can not be written anymore.
pub trait OrFatal<T> {
    /// Unwrap the value or panic with an `eyre` report naming `context`
    /// followed by the chain of causes.
    fn or_fatal(self, context: &'static str) -> T;
}

impl<T, E> OrFatal<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn or_fatal(self, context: &'static str) -> T {
        self.wrap_err(context)
            .unwrap_or_else(|report| panic!("{report:?}"))
    }
}

use std::fmt::Debug;

/// Sink for log messages
pub trait Logger: Debug {
    /// Logs the removal summary, the result text and where it was written
    fn info(&self, message: &str);

    /// Logs a progress step. Only called when [`Options::verbose`] is set
    ///
    /// [`Options::verbose`]: crate::Options::verbose
    fn debug(&self, message: &str);
}

/// Logs events to standard error
#[derive(Debug)]
pub struct StdLogger;

impl Logger for StdLogger {
    #[inline]
    fn info(&self, message: &str) {
        eprintln!("{}", message);
    }

    #[inline]
    fn debug(&self, message: &str) {
        eprintln!("DEBUG: {}", message);
    }
}

/// Discards all log events
#[derive(Debug)]
pub struct NullLogger;

impl Logger for NullLogger {
    #[inline]
    fn info(&self, _message: &str) {}

    #[inline]
    fn debug(&self, _message: &str) {}
}

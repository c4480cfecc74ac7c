//! The `Logger` external collaborator contract (§6).
//!
//! The core never talks to `tracing` directly in its public API, since a
//! host may already own a logging story. Instead the listener and resolver
//! take a `&dyn Logger`; the default implementation forwards to `tracing`
//! (the same crate the rest of the workspace's ambient stack uses), with
//! lazy message construction so a disabled level never builds a `String`.

/// Leveled logging, most-to-least severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// A leveled logger with lazy message construction: the closure only runs
/// when the level is enabled, so hot paths (e.g. per-token binder logging)
/// don't pay for formatting that gets thrown away.
pub trait Logger {
    fn enabled(&self, level: LogLevel) -> bool;
    fn log(&self, level: LogLevel, message: &str);

    fn log_lazy(&self, level: LogLevel, make_message: impl FnOnce() -> String) {
        if self.enabled(level) {
            self.log(level, &make_message());
        }
    }
}

/// A logger that discards everything. Used in tests and as a default when a
/// host doesn't care about listener diagnostics beyond the `ErrorReporter`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn enabled(&self, _level: LogLevel) -> bool {
        false
    }

    fn log(&self, _level: LogLevel, _message: &str) {}
}

/// Forwards to the `tracing` crate's global subscriber.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn enabled(&self, level: LogLevel) -> bool {
        tracing::enabled!(match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        })
    }

    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Error => tracing::error!("{message}"),
            LogLevel::Warn => tracing::warn!("{message}"),
            LogLevel::Info => tracing::info!("{message}"),
            LogLevel::Debug => tracing::debug!("{message}"),
            LogLevel::Trace => tracing::trace!("{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn noop_logger_never_calls_message_builder() {
        let logger = NoopLogger;
        let called = Cell::new(false);
        logger.log_lazy(LogLevel::Error, || {
            called.set(true);
            "unused".to_string()
        });
        assert!(!called.get());
    }
}

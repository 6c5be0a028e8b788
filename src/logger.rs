use std::fmt::Display;
use std::sync::Arc;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::bind::{TraceLogger, apply_trace_id};
use crate::record::{AuditData, LogRecord, RecordContext};
use crate::sink::{ErrorHook, Sink, build_sinks};
use crate::{Error, Level, LogConfig, Result};

/// The five-entry-point logging shape shared by [`Logger`] and
/// [`crate::MockLogger`], for drop-in substitution in tests or
/// disabled-logging code paths.
///
/// An absent `trace_id` is emitted as the all-zero default id.
pub trait Log: Send + Sync {
    fn debug(&self, trace_id: Option<&str>, function_name: &str, message: &str);
    fn warn(&self, trace_id: Option<&str>, function_name: &str, message: &str);
    fn info(&self, trace_id: Option<&str>, function_name: &str, message: &str);
    fn error(
        &self,
        trace_id: Option<&str>,
        function_name: &str,
        message: &str,
        error: &dyn Display,
    );
    fn audit(
        &self,
        trace_id: Option<&str>,
        user: &str,
        display_name: &str,
        message: &str,
        data: Option<&AuditData>,
    );
}

struct Inner {
    hostname: String,
    environment: String,
    service: String,
    build_version: Option<String>,
    sinks: Vec<Box<dyn Sink>>,
    hook: ErrorHook,
}

/// A long-lived logger bound to one [`LogConfig`].
///
/// Cheap to clone and safe to share across concurrent call sites; all
/// per-call data flows through arguments, not instance fields. Log calls
/// never block on file I/O and never panic on transport failures.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

impl Logger {
    /// Build a logger from a config.
    ///
    /// Fails fast on missing required config fields or when the log
    /// directory cannot be created.
    pub fn new(config: LogConfig) -> Result<Self> {
        config.validate()?;

        let hook = ErrorHook::new();
        let sinks = build_sinks(&config, &hook)?;

        Ok(Self {
            inner: Arc::new(Inner {
                hostname: config.hostname,
                environment: config.environment,
                service: config.service_name,
                build_version: config.build_version,
                sinks,
                hook,
            }),
        })
    }

    /// Replace the error hook invoked on sink transport failures.
    ///
    /// The default hook prints the error to stderr and continues; errors are
    /// never thrown back into the caller's control flow.
    pub fn on_error(&self, callback: impl Fn(&Error) + Send + Sync + 'static) {
        self.inner.hook.replace(callback);
    }

    /// Pre-fill the trace id across all severities. A `None` trace id is
    /// resolved to a freshly generated random id.
    pub fn with_trace_id(&self, trace_id: Option<&str>) -> TraceLogger {
        apply_trace_id(trace_id, self)
    }

    fn dispatch(&self, level: Level, trace_id: Option<&str>, context: RecordContext) {
        let record = LogRecord {
            timestamp: now_timestamp(&self.inner.hook),
            environment: self.inner.environment.clone(),
            hostname: self.inner.hostname.clone(),
            build_version: self.inner.build_version.clone(),
            trace_id: trace_id.map(str::to_string),
            service: self.inner.service.clone(),
            level,
            context,
        };

        for sink in &self.inner.sinks {
            if sink.min_level().admits(level) {
                sink.emit(&record);
            }
        }
    }

    fn standard(&self, level: Level, trace_id: Option<&str>, function_name: &str, message: &str) {
        self.dispatch(
            level,
            trace_id,
            RecordContext::Standard {
                function_name: function_name.to_string(),
                message: message.to_string(),
                error: None,
            },
        );
    }
}

fn now_timestamp(hook: &ErrorHook) -> String {
    match OffsetDateTime::now_utc().format(&Rfc3339) {
        Ok(timestamp) => timestamp,
        Err(error) => {
            hook.emit(&Error::Io(std::io::Error::other(error)));
            String::new()
        }
    }
}

impl Log for Logger {
    fn debug(&self, trace_id: Option<&str>, function_name: &str, message: &str) {
        self.standard(Level::Debug, trace_id, function_name, message);
    }

    fn warn(&self, trace_id: Option<&str>, function_name: &str, message: &str) {
        self.standard(Level::Warn, trace_id, function_name, message);
    }

    fn info(&self, trace_id: Option<&str>, function_name: &str, message: &str) {
        self.standard(Level::Info, trace_id, function_name, message);
    }

    fn error(
        &self,
        trace_id: Option<&str>,
        function_name: &str,
        message: &str,
        error: &dyn Display,
    ) {
        self.dispatch(
            Level::Error,
            trace_id,
            RecordContext::Standard {
                function_name: function_name.to_string(),
                message: message.to_string(),
                error: Some(error.to_string()),
            },
        );
    }

    fn audit(
        &self,
        trace_id: Option<&str>,
        user: &str,
        display_name: &str,
        message: &str,
        data: Option<&AuditData>,
    ) {
        self.dispatch(
            Level::Audit,
            trace_id,
            RecordContext::Audit {
                user: user.to_string(),
                display_name: display_name.to_string(),
                message: message.to_string(),
                data: data.cloned(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = Logger::new(LogConfig::new("", "test", "test-app"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_new_without_directory_touches_no_disk() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Logger::new(LogConfig::new("hostname", "test", "test-app")).unwrap();
        logger.info(Some("trace"), "fn", "message");

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_logger_is_cloneable_and_shareable() {
        let logger = Logger::new(LogConfig::new("hostname", "test", "test-app")).unwrap();
        let clone = logger.clone();

        let handle = std::thread::spawn(move || {
            clone.info(Some("t"), "thread", "from another thread");
        });
        logger.info(Some("t"), "main", "from main");
        handle.join().unwrap();
    }

    #[test]
    fn test_now_timestamp_is_rfc3339_utc() {
        let ts = now_timestamp(&ErrorHook::new());
        assert!(ts.ends_with('Z'));
        assert!(ts.contains('T'));
    }

    #[test]
    fn test_on_error_replaces_hook() {
        let logger = Logger::new(LogConfig::new("hostname", "test", "test-app")).unwrap();
        logger.on_error(|_| {});
    }
}

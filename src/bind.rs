//! Progressive specialization of a logger.
//!
//! Two composable transforms pre-fill leading arguments of a [`Logger`]:
//! first the trace id, then the function name. Each returns a narrower view
//! that needs fewer arguments per call and carries the fixed values as
//! read-only attributes.
//!
//! ```rust
//! use pipelog::{Log, LogConfig, Logger, apply_function_name, apply_trace_id};
//!
//! let logger = Logger::new(LogConfig::new("host", "prod", "svc"))?;
//! let scoped = apply_function_name("login", &apply_trace_id(Some("tid"), &logger));
//! scoped.info("user authenticated");
//! # Ok::<(), pipelog::Error>(())
//! ```

use std::fmt::Display;

use crate::ids::generate_trace_id;
use crate::logger::{Log, Logger};
use crate::record::AuditData;

/// A logger view with the trace id fixed across all five severities.
///
/// Lightweight; created per call site rather than persisted.
#[derive(Clone)]
pub struct TraceLogger {
    logger: Logger,
    trace_id: String,
}

impl TraceLogger {
    /// The resolved trace id carried by this view.
    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// Further fix the function name for the standard severities.
    pub fn with_function_name(&self, function_name: &str) -> ScopedLogger {
        apply_function_name(function_name, self)
    }

    pub fn debug(&self, function_name: &str, message: &str) {
        self.logger.debug(Some(&self.trace_id), function_name, message);
    }

    pub fn warn(&self, function_name: &str, message: &str) {
        self.logger.warn(Some(&self.trace_id), function_name, message);
    }

    pub fn info(&self, function_name: &str, message: &str) {
        self.logger.info(Some(&self.trace_id), function_name, message);
    }

    pub fn error(&self, function_name: &str, message: &str, error: &dyn Display) {
        self.logger
            .error(Some(&self.trace_id), function_name, message, error);
    }

    pub fn audit(&self, user: &str, display_name: &str, message: &str, data: Option<&AuditData>) {
        self.logger
            .audit(Some(&self.trace_id), user, display_name, message, data);
    }
}

/// A logger view with both the trace id and the function name fixed.
///
/// Audit has no function-name concept and is not part of this view.
#[derive(Clone)]
pub struct ScopedLogger {
    logger: Logger,
    trace_id: String,
    function_name: String,
}

impl ScopedLogger {
    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    pub fn debug(&self, message: &str) {
        self.logger
            .debug(Some(&self.trace_id), &self.function_name, message);
    }

    pub fn warn(&self, message: &str) {
        self.logger
            .warn(Some(&self.trace_id), &self.function_name, message);
    }

    pub fn info(&self, message: &str) {
        self.logger
            .info(Some(&self.trace_id), &self.function_name, message);
    }

    pub fn error(&self, message: &str, error: &dyn Display) {
        self.logger
            .error(Some(&self.trace_id), &self.function_name, message, error);
    }
}

/// Fix the trace id of a logger.
///
/// An absent or empty trace id resolves to a freshly generated random id,
/// never the all-zero default, so lines from this view stay correlatable.
pub fn apply_trace_id(trace_id: Option<&str>, logger: &Logger) -> TraceLogger {
    let trace_id = match trace_id {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => generate_trace_id(),
    };

    TraceLogger {
        logger: logger.clone(),
        trace_id,
    }
}

/// Fix the function name of a trace-bound logger view.
pub fn apply_function_name(function_name: &str, logger: &TraceLogger) -> ScopedLogger {
    ScopedLogger {
        logger: logger.logger.clone(),
        trace_id: logger.trace_id.clone(),
        function_name: function_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogConfig;
    use crate::ids::default_trace_id;

    fn logger() -> Logger {
        Logger::new(LogConfig::new("hostname", "test", "test-app")).unwrap()
    }

    #[test]
    fn test_apply_trace_id_keeps_provided_id() {
        let view = apply_trace_id(Some("tr2"), &logger());
        assert_eq!(view.trace_id(), "tr2");
    }

    #[test]
    fn test_apply_trace_id_generates_when_absent() {
        let view = apply_trace_id(None, &logger());
        assert!(!view.trace_id().is_empty());
        assert_ne!(view.trace_id(), default_trace_id());
    }

    #[test]
    fn test_apply_trace_id_generates_when_empty() {
        let view = apply_trace_id(Some(""), &logger());
        assert_ne!(view.trace_id(), default_trace_id());
    }

    #[test]
    fn test_apply_function_name_carries_both_attributes() {
        let scoped = apply_function_name("fn2", &apply_trace_id(Some("tr2"), &logger()));
        assert_eq!(scoped.trace_id(), "tr2");
        assert_eq!(scoped.function_name(), "fn2");
    }

    #[test]
    fn test_fluent_binding_matches_free_functions() {
        let logger = logger();
        let fluent = logger.with_trace_id(Some("tr2")).with_function_name("fn2");
        assert_eq!(fluent.trace_id(), "tr2");
        assert_eq!(fluent.function_name(), "fn2");
    }
}

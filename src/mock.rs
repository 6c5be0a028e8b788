use std::fmt::Display;

use crate::logger::Log;
use crate::record::AuditData;

/// A stand-in logger with the same shape as [`crate::Logger`].
///
/// Writes a structured one-line representation to the diagnostic channel
/// instead of any real sink; no file or network I/O. Useful in tests and
/// disabled-logging code paths.
pub struct MockLogger;

impl Log for MockLogger {
    fn debug(&self, trace_id: Option<&str>, function_name: &str, message: &str) {
        eprintln!(
            "level=debug trace_id={trace_id:?} function_name={function_name:?} message={message:?}"
        );
    }

    fn warn(&self, trace_id: Option<&str>, function_name: &str, message: &str) {
        eprintln!(
            "level=warn trace_id={trace_id:?} function_name={function_name:?} message={message:?}"
        );
    }

    fn info(&self, trace_id: Option<&str>, function_name: &str, message: &str) {
        eprintln!(
            "level=info trace_id={trace_id:?} function_name={function_name:?} message={message:?}"
        );
    }

    fn error(
        &self,
        trace_id: Option<&str>,
        function_name: &str,
        message: &str,
        error: &dyn Display,
    ) {
        eprintln!(
            "level=error trace_id={trace_id:?} function_name={function_name:?} message={message:?} error={error}"
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
        eprintln!(
            "level=audit trace_id={trace_id:?} user={user:?} display_name={display_name:?} message={message:?} data={data:?}"
        );
    }
}

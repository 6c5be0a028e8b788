use serde::Serialize;
use serde_json::Value;

use crate::ids::default_trace_id;
use crate::{Level, Result};

/// Structured payload of an audit record.
///
/// Text passes through to the line verbatim; anything else is carried as JSON
/// and rendered compact. Message text elsewhere is opaque: callers pre-format
/// any objects they embed in it themselves.
#[derive(Debug, Clone, PartialEq)]
pub enum AuditData {
    Text(String),
    Json(Value),
}

impl AuditData {
    /// Build audit data from any serializable value.
    ///
    /// Serialization failures surface here, synchronously at the call site,
    /// before anything is logged.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// Wire text of the data field.
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Json(value) => value.to_string(),
        }
    }
}

impl From<&str> for AuditData {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for AuditData {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for AuditData {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

/// Level-specific part of a record.
#[derive(Debug, Clone)]
pub enum RecordContext {
    /// Shape of debug/warn/info/error records.
    Standard {
        function_name: String,
        message: String,
        /// Rendered error message; presence turns the final field into
        /// `"{message} [{error}]"`.
        error: Option<String>,
    },
    /// Shape of audit records: a user-attributed action.
    Audit {
        user: String,
        display_name: String,
        message: String,
        data: Option<AuditData>,
    },
}

/// One log record, the unit processed per call.
///
/// The timestamp is stamped by the dispatch layer, not the caller.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub timestamp: String,
    pub environment: String,
    pub hostname: String,
    pub build_version: Option<String>,
    pub trace_id: Option<String>,
    pub service: String,
    pub level: Level,
    pub context: RecordContext,
}

/// Format one record as a pipe-delimited line, no trailing pipe.
///
/// Audit records render `user|displayName|message[|data]` after the common
/// prefix, standard records `functionName|finalMessage`. The trace id field
/// is never empty; absence is replaced by the all-zero default id.
pub fn format_line(record: &LogRecord) -> String {
    render(record, false)
}

/// Same as [`format_line`] with the level token colorized for the console.
pub(crate) fn format_line_colored(record: &LogRecord) -> String {
    render(record, true)
}

fn render(record: &LogRecord, colorize: bool) -> String {
    let trace_id = match record.trace_id.as_deref() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => default_trace_id(),
    };
    let level = if colorize {
        record.level.painted()
    } else {
        record.level.as_str().to_string()
    };

    let mut bits = vec![
        record.timestamp.clone(),
        record.environment.clone(),
        record.hostname.clone(),
        record.build_version.clone().unwrap_or_else(|| "0".to_string()),
        trace_id,
        record.service.clone(),
        level,
    ];

    match &record.context {
        RecordContext::Standard {
            function_name,
            message,
            error,
        } => {
            bits.push(function_name.clone());
            bits.push(match error {
                Some(err) => format!("{message} [{err}]"),
                None => message.clone(),
            });
        }
        RecordContext::Audit {
            user,
            display_name,
            message,
            data,
        } => {
            bits.push(user.clone());
            bits.push(display_name.clone());
            bits.push(message.clone());
            if let Some(data) = data {
                bits.push(data.render());
            }
        }
    }

    bits.join("|")
}

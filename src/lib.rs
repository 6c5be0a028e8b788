//! # Pipelog
//!
//! A pipe-delimited, leveled logging facade with trace ids, audit records
//! and daily file rotation.
//!
//! ## Features
//!
//! - Console and daily-rotating file sinks, assembled from one config
//! - Pipe-delimited lines with consistent metadata (timestamp, environment,
//!   hostname, build version, trace id, service)
//! - Audit level for user-attributed actions with optional structured data
//! - Progressive binding of trace id and function name
//!
//! ## Example
//!
//! ```rust
//! use pipelog::{Log, LogConfig, Logger};
//!
//! let config = LogConfig::new("hostname", "production", "my-service");
//! let logger = Logger::new(config)?;
//!
//! logger.info(Some("trace-id"), "startup", "service is up");
//! # Ok::<(), pipelog::Error>(())
//! ```

pub mod bind;
pub mod config;
pub mod error;
pub mod ids;
pub mod level;
pub mod logger;
pub mod mock;
pub mod record;
pub mod sink;
pub mod writer;

pub use bind::{ScopedLogger, TraceLogger, apply_function_name, apply_trace_id};
pub use config::LogConfig;
pub use error::{Error, Result};
pub use ids::{default_trace_id, generate_trace_id};
pub use level::Level;
pub use logger::{Log, Logger};
pub use mock::MockLogger;
pub use record::{AuditData, LogRecord, RecordContext, format_line};
pub use sink::{ConsoleSink, FileSink, Sink, SyslogSink};
pub use writer::DailyRotatingWriter;

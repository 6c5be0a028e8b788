use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Level, Result};

/// Configuration for a logger instance.
///
/// `hostname`, `environment` and `service_name` are required tags carried on
/// every emitted line. The file sink is assembled if and only if `directory`
/// is set and non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Host the service runs on.
    pub hostname: String,
    /// Environment the service logs from (e.g. "test", "production").
    pub environment: String,
    /// Name of the service on the host.
    pub service_name: String,
    /// Directory for log files. Presence enables the file sink.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    /// Log file name stem; the UTC date is appended (`log.<YYYY-MM-DD>`).
    #[serde(default)]
    pub file_name: Option<String>,
    /// Minimum level for all sinks. When unset, console defaults to `debug`
    /// and file to `info`.
    #[serde(default)]
    pub level: Option<Level>,
    /// Build version tag, emitted as `"0"` when unset.
    #[serde(default)]
    pub build_version: Option<String>,
    /// Syslog server address (experimental UDP transport).
    #[serde(default)]
    pub syslog_server: Option<String>,
    /// Syslog server port, defaults to 514.
    #[serde(default)]
    pub syslog_port: Option<u16>,
}

impl LogConfig {
    /// Create a config with the required tags.
    pub fn new(
        hostname: impl Into<String>,
        environment: impl Into<String>,
        service_name: impl Into<String>,
    ) -> Self {
        Self {
            hostname: hostname.into(),
            environment: environment.into(),
            service_name: service_name.into(),
            directory: None,
            file_name: None,
            level: None,
            build_version: None,
            syslog_server: None,
            syslog_port: None,
        }
    }

    /// Enable file logging into the given directory.
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// Set the log file name stem.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Set the minimum level for all sinks.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Set the build version tag.
    pub fn with_build_version(mut self, build_version: impl Into<String>) -> Self {
        self.build_version = Some(build_version.into());
        self
    }

    /// Point the experimental syslog transport at a server.
    pub fn with_syslog(mut self, server: impl Into<String>, port: u16) -> Self {
        self.syslog_server = Some(server.into());
        self.syslog_port = Some(port);
        self
    }

    /// Check required fields, failing fast at logger construction time.
    pub fn validate(&self) -> Result<()> {
        if self.hostname.is_empty() {
            return Err(Error::Config("hostname must not be empty".to_string()));
        }
        if self.environment.is_empty() {
            return Err(Error::Config("environment must not be empty".to_string()));
        }
        if self.service_name.is_empty() {
            return Err(Error::Config("service_name must not be empty".to_string()));
        }
        Ok(())
    }

    /// Directory for the file sink, `None` when unset or empty.
    pub(crate) fn file_directory(&self) -> Option<&Path> {
        self.directory
            .as_deref()
            .filter(|dir| !dir.as_os_str().is_empty())
    }

    /// File name stem without the date suffix.
    pub(crate) fn file_stem(&self) -> &str {
        self.file_name.as_deref().unwrap_or("log")
    }

    /// Minimum level of the console sink.
    pub(crate) fn console_level(&self) -> Level {
        self.level.unwrap_or(Level::Debug)
    }

    /// Minimum level of the file sink.
    pub(crate) fn file_level(&self) -> Level {
        self.level.unwrap_or(Level::Info)
    }
}

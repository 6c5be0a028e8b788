use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Whether console output should carry ANSI colors.
///
/// Decided once per process; repeated logger construction never re-evaluates
/// or races. Colors are immutable for the process lifetime, no teardown.
static COLORS_ENABLED: Lazy<bool> = Lazy::new(|| std::env::var_os("NO_COLOR").is_none());

pub(crate) fn colors_enabled() -> bool {
    *COLORS_ENABLED
}

/// Log severity, ordered by priority.
///
/// Lower priority number means more severe and always emitted:
/// `error`(0) > `warn`(1) > `audit`(2) > `info`(3) > `debug`(4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Warn,
    Audit,
    Info,
    Debug,
}

impl Level {
    /// Numeric priority of this level.
    pub fn priority(self) -> u8 {
        match self {
            Self::Error => 0,
            Self::Warn => 1,
            Self::Audit => 2,
            Self::Info => 3,
            Self::Debug => 4,
        }
    }

    /// Lowercase wire name of this level.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Audit => "audit",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    /// Whether a sink configured with `self` as its minimum level emits a
    /// record of level `record`.
    pub fn admits(self, record: Level) -> bool {
        record.priority() <= self.priority()
    }

    pub fn is_audit(self) -> bool {
        matches!(self, Self::Audit)
    }

    /// ANSI color code used by the console sink.
    fn color_code(self) -> &'static str {
        match self {
            Self::Error => "31",  // red
            Self::Warn => "33",   // yellow
            Self::Audit => "34",  // blue
            Self::Info => "32",   // green
            Self::Debug => "90",  // grey
        }
    }

    /// Colorized level token for console output. Plain when colors are off.
    pub(crate) fn painted(self) -> String {
        if colors_enabled() {
            format!("\x1b[{}m{}\x1b[0m", self.color_code(), self.as_str())
        } else {
            self.as_str().to_string()
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" => Ok(Self::Warn),
            "audit" => Ok(Self::Audit),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            other => Err(Error::Level(other.to_string())),
        }
    }
}

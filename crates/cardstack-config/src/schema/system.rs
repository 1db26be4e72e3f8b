//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
#[derive(Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// `EnvFilter` directive scoped to the cardstack crates.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "cardstack=trace",
            LogLevel::Debug => "cardstack=debug",
            LogLevel::Info => "cardstack=info",
            LogLevel::Warning => "cardstack=warn",
            LogLevel::Error => "cardstack=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Include span/target information in log lines.
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            with_target: false,
        }
    }
}

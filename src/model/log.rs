use chrono::{DateTime, Local};
use std::fmt;

/// Severity of a [`LogRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A timestamped, leveled line of operator-facing log output.
///
/// `sequence` is assigned by the event bridge at publish time and increases
/// strictly, so observers and tests can verify production order.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub sequence: u64,
    pub at: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.at.format("%Y-%m-%d %H:%M:%S"),
            self.level,
            self.message
        )
    }
}

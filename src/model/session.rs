use chrono::{DateTime, Local};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of the bot's connection to Discord.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    /// The last attempt ended with an error; the operator may start again.
    Failed(String),
}

impl SessionStatus {
    /// Whether a session attempt is in flight or established.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Connecting | Self::Connected)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Disconnected => "Disconnected",
            Self::Connecting => "Connecting",
            Self::Connected => "Connected",
            Self::Failed(_) => "Failed",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(reason) => write!(f, "Failed: {reason}"),
            other => f.write_str(other.label()),
        }
    }
}

/// Remote-visible status of the bot account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Online,
    Idle,
    Invisible,
}

impl Presence {
    pub const ALL: [Presence; 3] = [Presence::Online, Presence::Idle, Presence::Invisible];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Idle => "idle",
            Self::Invisible => "invisible",
        }
    }
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Presence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "online" => Ok(Self::Online),
            "idle" => Ok(Self::Idle),
            "invisible" => Ok(Self::Invisible),
            other => Err(format!("unknown presence '{other}'")),
        }
    }
}

/// A guild the bot account is a member of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSummary {
    pub name: String,
    pub id: u64,
    pub member_count: u64,
}

/// Point-in-time copy of the session state handed to the control panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub server_count: usize,
    pub operating_channel: Option<u64>,
    pub log_channel: Option<u64>,
    pub presence: Option<Presence>,
    /// When the current session finished its handshake.
    pub connected_since: Option<DateTime<Local>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presence_parses_operator_input() {
        assert_eq!("online".parse::<Presence>(), Ok(Presence::Online));
        assert_eq!(" Idle ".parse::<Presence>(), Ok(Presence::Idle));
        assert_eq!("INVISIBLE".parse::<Presence>(), Ok(Presence::Invisible));
        assert!("away".parse::<Presence>().is_err());
    }

    #[test]
    fn only_connecting_and_connected_are_active() {
        assert!(SessionStatus::Connecting.is_active());
        assert!(SessionStatus::Connected.is_active());
        assert!(!SessionStatus::Disconnected.is_active());
        assert!(!SessionStatus::Failed("boom".to_string()).is_active());
    }
}

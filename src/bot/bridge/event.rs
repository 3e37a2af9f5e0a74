use crate::model::log::LogLevel;

/// Typed session events published through the [`EventBridge`](super::EventBridge).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Connecting,
    Connected { bot_name: String, server_count: usize },
    ConnectionFailed { reason: String },
    Disconnected,
    MemberJoined { name: String, server: String },
    MemberLeft { name: String, server: String },
    MessageDeleted { author: String },
    MessageEdited { author: String },
    CommandFailed { command: String, detail: String },
    /// Free-form operator notice from any component.
    Notice { level: LogLevel, message: String },
}

impl SessionEvent {
    /// Level and human-readable text of the event.
    pub fn describe(&self) -> (LogLevel, String) {
        match self {
            Self::Connecting => (LogLevel::Info, "Connecting to Discord...".to_string()),
            Self::Connected {
                bot_name,
                server_count,
            } => (
                LogLevel::Info,
                format!("{bot_name} has connected to Discord! ({server_count} servers)"),
            ),
            Self::ConnectionFailed { reason } => {
                (LogLevel::Error, format!("Connection failed: {reason}"))
            }
            Self::Disconnected => (LogLevel::Info, "Disconnected from Discord.".to_string()),
            Self::MemberJoined { name, server } => {
                (LogLevel::Info, format!("{name} has joined {server}."))
            }
            Self::MemberLeft { name, server } => {
                (LogLevel::Info, format!("{name} has left {server}."))
            }
            Self::MessageDeleted { author } => {
                (LogLevel::Info, format!("A message by {author} was deleted."))
            }
            Self::MessageEdited { author } => {
                (LogLevel::Info, format!("Message by {author} was edited."))
            }
            Self::CommandFailed { command, detail } => (
                LogLevel::Error,
                format!("Command '{command}' failed: {detail}"),
            ),
            Self::Notice { level, message } => (*level, message.clone()),
        }
    }
}

use thiserror::Error;

/// Failures of the command dispatcher.
///
/// `NotACommand` and `UnknownCommand` are expected for ordinary chat traffic and are
/// ignored silently. `ArgumentParse` and `MissingPermission` have already been
/// answered in the invoking channel when they are returned. `Handler` has been
/// answered with a generic apology and carries the detail for the log.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The message does not start with the command prefix.
    #[error("Message is not a command")]
    NotACommand,

    /// The prefix is present but no command has this name.
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    /// Arguments did not match the command's signature.
    #[error("Invalid arguments for '{command}': {usage}")]
    ArgumentParse { command: String, usage: String },

    /// The invoking member lacks the permission the command requires.
    #[error("Missing permission for '{command}': {reason}")]
    MissingPermission { command: String, reason: String },

    /// The handler itself failed.
    #[error("Command '{command}' failed: {detail}")]
    Handler { command: String, detail: String },
}

/// Failures registering a command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Command '{0}' is already registered")]
    DuplicateCommand(String),
}

/// Failure returned by a command handler.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Arguments were well-counted but malformed; the message is a usage hint for the
    /// invoking channel.
    #[error("{0}")]
    Usage(String),

    /// The invoker is not allowed to run the command here.
    #[error("{0}")]
    Forbidden(String),

    /// Internal failure; the message is logged, not shown to the channel.
    #[error("{0}")]
    Failed(String),
}

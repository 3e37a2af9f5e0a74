use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// An environment variable is set but its value cannot be used.
    ///
    /// Check the variable against the table in the README or `.env.example`.
    #[error("Invalid value '{value}' for environment variable {name}")]
    InvalidEnvVar { name: String, value: String },

    /// No bot token has been configured.
    ///
    /// The token file is empty or missing; the operator must enter and save a token
    /// before starting the bot.
    #[error("No bot token configured")]
    MissingCredential,
}

use dioxus_logger::tracing::Level;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::bot::error::{config::ConfigError, AppError};

const DEFAULT_COMMAND_PREFIX: &str = "!";
const DEFAULT_TOKEN_FILE: &str = "bot_token.txt";
const DEFAULT_LOG_FILE: &str = "bot.log";
const DEFAULT_LOG_MAX_BYTES: u64 = 1024 * 1024;
const DEFAULT_LOG_BACKUPS: usize = 3;
const DEFAULT_CHARACTER_IMAGES_DIR: &str = "images/DnD";
const DEFAULT_SESSION_TIMEOUT_SECS: u64 = 10;

pub struct Config {
    pub command_prefix: String,
    pub token_file: PathBuf,
    /// Channel that receives the "has connected" announcement.
    pub log_channel_id: Option<u64>,

    pub log_file: PathBuf,
    pub log_max_bytes: u64,
    pub log_backups: usize,
    pub log_level: Level,

    pub character_images_dir: PathBuf,
    /// Upper bound on blocking calls into the session thread.
    pub session_timeout: Duration,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// Every variable is optional. Call `dotenvy::dotenv()` first if a `.env` file
    /// should be honoured.
    ///
    /// # Returns
    /// - `Ok(Config)` - All set variables parsed
    /// - `Err(AppError::ConfigErr(InvalidEnvVar))` - A set variable has an unusable value
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let command_prefix = match lookup("COMMAND_PREFIX") {
            Some(prefix) if prefix.trim().is_empty() || prefix.chars().any(char::is_whitespace) => {
                return Err(invalid("COMMAND_PREFIX", prefix));
            }
            Some(prefix) => prefix,
            None => DEFAULT_COMMAND_PREFIX.to_string(),
        };

        let log_channel_id = match lookup("LOG_CHANNEL_ID") {
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => Some(parse_var::<u64>("LOG_CHANNEL_ID", raw)?),
            None => None,
        };

        Ok(Self {
            command_prefix,
            token_file: lookup("TOKEN_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_FILE)),
            log_channel_id,
            log_file: lookup("LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            log_max_bytes: lookup("LOG_MAX_BYTES")
                .map(|raw| parse_var("LOG_MAX_BYTES", raw))
                .transpose()?
                .unwrap_or(DEFAULT_LOG_MAX_BYTES),
            log_backups: lookup("LOG_BACKUPS")
                .map(|raw| parse_var("LOG_BACKUPS", raw))
                .transpose()?
                .unwrap_or(DEFAULT_LOG_BACKUPS),
            log_level: lookup("LOG_LEVEL")
                .map(|raw| parse_var("LOG_LEVEL", raw))
                .transpose()?
                .unwrap_or(Level::INFO),
            character_images_dir: lookup("CHARACTER_IMAGES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CHARACTER_IMAGES_DIR)),
            session_timeout: Duration::from_secs(
                lookup("SESSION_TIMEOUT_SECS")
                    .map(|raw| parse_var("SESSION_TIMEOUT_SECS", raw))
                    .transpose()?
                    .unwrap_or(DEFAULT_SESSION_TIMEOUT_SECS),
            ),
        })
    }
}

fn parse_var<T: FromStr>(name: &str, raw: String) -> Result<T, AppError> {
    raw.trim().parse::<T>().map_err(|_| invalid(name, raw))
}

fn invalid(name: &str, value: String) -> AppError {
    ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value,
    }
    .into()
}

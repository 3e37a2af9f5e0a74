//! Error types for the bot backend.
//!
//! Each concern owns a small `thiserror` enum; `AppError` aggregates them for the
//! startup path and the control panel, where anything can surface. Errors raised
//! while handling Discord events never travel this far: command failures are
//! answered in the channel and logged, and transport failures become a session
//! status change.

pub mod config;
pub mod content;
pub mod dispatch;
pub mod gateway;
pub mod observer;
pub mod session;

use thiserror::Error;

use crate::bot::error::{
    config::ConfigError, content::ContentError, dispatch::RegistryError, observer::ObserverError,
    session::SessionError,
};

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid environment configuration or missing credential.
    ///
    /// Reported to the operator; the session is not started.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Session lifecycle or query failure.
    #[error(transparent)]
    SessionErr(#[from] SessionError),

    /// Command table could not be built.
    #[error(transparent)]
    RegistryErr(#[from] RegistryError),

    /// Log file observer could not be opened.
    #[error("Failed to open log file: {0}")]
    ObserverErr(#[from] ObserverError),

    /// HTTP client for content commands could not be built.
    #[error(transparent)]
    ContentErr(#[from] ContentError),

    /// Filesystem failure while persisting the token or saving logs.
    ///
    /// Treated as a warning by the control panel, never fatal.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Tracing subscriber could not be installed.
    #[error("Failed to initialise logging: {0}")]
    LoggingErr(String),
}

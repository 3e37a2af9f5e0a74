use dioxus_logger::tracing;
use std::sync::Arc;

use crate::bot::bridge::observer::{ConsoleObserver, RotatingFileObserver};
use crate::bot::bridge::EventBridge;
use crate::bot::command::handler::{build_registry, CommandDeps};
use crate::bot::command::CommandRegistry;
use crate::bot::config::Config;
use crate::bot::control::ControlPanel;
use crate::bot::error::AppError;
use crate::bot::gateway::SerenityConnector;
use crate::bot::service::{AutoModService, FileTokenStore, HttpContentSource, TokenStore};
use crate::bot::session::SessionManager;

/// Installs the tracing subscriber at the configured level.
pub fn init_logging(config: &Config) -> Result<(), AppError> {
    dioxus_logger::init(config.log_level).map_err(|e| AppError::LoggingErr(e.to_string()))
}

/// Creates the event bridge with console and rotating-file observers.
///
/// The file observer doubles as the fallback that receives reports about other
/// observers failing.
///
/// # Returns
/// - `Ok(Arc<EventBridge>)` - Bridge with both observers subscribed
/// - `Err(AppError::ObserverErr)` - The log file could not be opened
pub fn build_bridge(config: &Config) -> Result<Arc<EventBridge>, AppError> {
    let bridge = Arc::new(EventBridge::new());
    bridge.subscribe(Arc::new(ConsoleObserver));

    let file = RotatingFileObserver::open(&config.log_file, config.log_max_bytes, config.log_backups)?;
    bridge.subscribe_fallback(Arc::new(file));

    Ok(bridge)
}

pub fn build_commands(config: &Config, automod: AutoModService) -> Result<Arc<CommandRegistry>, AppError> {
    let deps = CommandDeps {
        content: Arc::new(HttpContentSource::new()?),
        automod,
        images_dir: config.character_images_dir.clone(),
    };
    let registry = build_registry(&config.command_prefix, deps)?;
    tracing::debug!("Registered {} commands", registry.len());
    Ok(Arc::new(registry))
}

/// Wires the session thread, token store and services behind a control panel.
pub fn build_panel(config: &Config, bridge: Arc<EventBridge>) -> Result<ControlPanel, AppError> {
    let tokens = FileTokenStore::new(&config.token_file);
    if let Err(e) = tokens.ensure_exists() {
        tracing::warn!("Failed to create token file {}: {}", tokens.location(), e);
    }

    let automod = AutoModService::new();
    let registry = build_commands(config, automod.clone())?;

    let session = SessionManager::spawn(
        Arc::new(SerenityConnector::new()),
        registry,
        bridge.clone(),
        config.session_timeout,
        config.log_channel_id,
    )?;

    Ok(ControlPanel::new(
        Arc::new(session),
        Arc::new(tokens),
        automod,
        bridge,
    ))
}

/// Runs the bot without a window until Ctrl-C.
pub fn run_headless(panel: ControlPanel) -> Result<(), AppError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        panel.start().await?;
        tracing::info!("Running headless, press Ctrl-C to stop");

        tokio::signal::ctrl_c().await?;

        tracing::info!("Stopping...");
        match panel.stop().await {
            Ok(()) => Ok(()),
            // the connection may already have failed on its own
            Err(crate::bot::error::session::SessionError::NotRunning) => Ok(()),
            Err(e) => Err(e.into()),
        }
    })
}

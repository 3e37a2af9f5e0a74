use dioxus_logger::tracing;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::credential::Credential;

/// Persistence for the bot token.
pub trait TokenStore: Send + Sync {
    /// Returns the stored token, or `None` when nothing usable is stored.
    fn load(&self) -> Option<Credential>;

    fn save(&self, credential: &Credential) -> io::Result<()>;

    /// Human-readable location, for log messages.
    fn location(&self) -> String;
}

/// Token kept as plain text in a single file.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the token file empty when it does not exist yet.
    pub fn ensure_exists(&self) -> io::Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, "")?;
        tracing::info!("Created empty token file at {}", self.path.display());
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<Credential> {
        if let Err(e) = self.ensure_exists() {
            tracing::warn!(
                "Failed to create token file {}: {}",
                self.path.display(),
                e
            );
            return None;
        }

        match fs::read_to_string(&self.path) {
            Ok(raw) => Credential::parse(&raw),
            Err(e) => {
                tracing::warn!("Failed to read token file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn save(&self, credential: &Credential) -> io::Result<()> {
        fs::write(&self.path, credential.expose())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

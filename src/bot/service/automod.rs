//! Per-server auto-moderation switch.
//!
//! Only the switch itself lives here; nothing enforces moderation yet. State is
//! held in memory and resets when the process exits.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct AutoModService {
    enabled: Arc<RwLock<HashMap<u64, bool>>>,
}

impl AutoModService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips auto-moderation for a server.
    ///
    /// # Returns
    /// - `true` - Auto-moderation is now enabled
    /// - `false` - Auto-moderation is now disabled
    pub async fn toggle(&self, guild_id: u64) -> bool {
        let mut enabled = self.enabled.write().await;
        let state = enabled.entry(guild_id).or_insert(false);
        *state = !*state;
        *state
    }

    pub async fn is_enabled(&self, guild_id: u64) -> bool {
        self.enabled
            .read()
            .await
            .get(&guild_id)
            .copied()
            .unwrap_or(false)
    }

    /// Servers that currently have auto-moderation enabled.
    pub async fn enabled_guilds(&self) -> Vec<u64> {
        let mut guilds: Vec<u64> = self
            .enabled
            .read()
            .await
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(id, _)| *id)
            .collect();
        guilds.sort_unstable();
        guilds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests toggling twice from the default state.
    ///
    /// Expected: enabled after the first toggle, disabled after the second
    #[tokio::test]
    async fn toggle_flips_state() {
        let service = AutoModService::new();

        assert!(!service.is_enabled(1).await);
        assert!(service.toggle(1).await);
        assert!(service.is_enabled(1).await);
        assert!(!service.toggle(1).await);
        assert!(!service.is_enabled(1).await);
    }

    /// Tests that servers are tracked independently.
    ///
    /// Expected: only the toggled server is listed
    #[tokio::test]
    async fn servers_are_independent() {
        let service = AutoModService::new();

        service.toggle(7).await;
        service.toggle(3).await;
        service.toggle(3).await;

        assert_eq!(service.enabled_guilds().await, vec![7]);
        assert!(!service.is_enabled(3).await);
    }
}

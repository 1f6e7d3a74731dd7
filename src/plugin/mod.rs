//! Host-facing plugin surface
//!
//! Thin wrappers around the playback monitor implementing the host's plugin
//! contract: registration metadata, notification delivery, the settings
//! panel with its apply hook, shutdown, uninstall, and the permanently
//! unused lyrics/artwork provider stubs.

pub mod info;
pub mod panel;
pub mod providers;

pub use info::{Capabilities, PluginInfo, Version};
pub use panel::SettingsPanel;

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::config::ConfigStore;
use crate::error::ConfigError;
use crate::events::MonitorHandle;
use crate::monitor::PlaybackMonitor;
use crate::player::{HostNotification, PlayerControl};

/// The plugin as the host sees it
///
/// Construction spawns the monitor task, so this must be created inside a
/// Tokio runtime. The host-supplied `data_dir` is where the one-line settings
/// file lives.
pub struct Plugin {
    info: PluginInfo,
    config: ConfigStore,
    handle: MonitorHandle,
}

impl Plugin {
    /// Initialise the plugin against the host player
    pub fn new(player: Arc<dyn PlayerControl>, data_dir: impl AsRef<Path>) -> Self {
        let info = PluginInfo::new();
        let config = ConfigStore::new(data_dir);
        let (monitor, handle) = PlaybackMonitor::new(player, config.clone());
        tokio::spawn(monitor.run());

        Self {
            info,
            config,
            handle,
        }
    }

    /// Registration metadata for the host
    pub fn info(&self) -> &PluginInfo {
        &self.info
    }

    /// Monitor handle, for hosts that deliver notifications directly
    pub fn handle(&self) -> &MonitorHandle {
        &self.handle
    }

    /// Deliver a host lifecycle notification
    pub async fn receive_notification(&self, notification: HostNotification) {
        self.handle.notify(notification).await;
    }

    /// Build the settings panel, populated with the current timeout
    pub async fn configure(&self) -> SettingsPanel {
        SettingsPanel::new(self.handle.timeout().await)
    }

    /// Apply hook: validate the panel text and put the new timeout into
    /// effect (rearming the countdown) before persisting it
    pub async fn save_settings(&self, input: &str) -> Result<(), ConfigError> {
        let timeout = input.parse()?;
        self.handle.apply_timeout(timeout).await
    }

    /// Shutdown hook: stop the countdown and end the monitor task
    pub async fn close(&self) {
        info!("Plugin closing");
        self.handle.shutdown().await;
    }

    /// Uninstall hook: remove the persisted settings file
    ///
    /// Goes straight to the store so cleanup works even after `close`.
    pub fn uninstall(&self) {
        info!("Plugin uninstalling, removing persisted settings");
        self.config.delete();
    }
}

//! Registration metadata reported to the host

use serde::Serialize;

/// Height in pixels the host should reserve for the settings panel
pub const CONFIG_PANEL_HEIGHT: u16 = 50;

/// Plugin version triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Version {
    pub major: u16,
    pub minor: u16,
    pub revision: u16,
}

/// Notification categories the plugin subscribes to and capabilities it offers
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Capabilities {
    /// Receive player lifecycle events (startup, play state changes)
    pub player_events: bool,
    /// Receive tag/track events (track changed)
    pub tag_events: bool,
    /// Lyrics retrieval is part of the host contract but never provided here
    pub lyrics: bool,
    /// Artwork retrieval is part of the host contract but never provided here
    pub artwork: bool,
}

/// Registration metadata handed to the host when the plugin loads
#[derive(Debug, Clone, Serialize)]
pub struct PluginInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub version: Version,
    pub capabilities: Capabilities,
    pub config_panel_height: u16,
}

impl PluginInfo {
    pub fn new() -> Self {
        Self {
            name: "auto-next",
            description: "Automatically go to the next track in the playlist after X seconds.",
            version: Version {
                major: 1,
                minor: 0,
                revision: 1,
            },
            capabilities: Capabilities {
                player_events: true,
                tag_events: true,
                lyrics: false,
                artwork: false,
            },
            config_panel_height: CONFIG_PANEL_HEIGHT,
        }
    }
}

impl Default for PluginInfo {
    fn default() -> Self {
        Self::new()
    }
}

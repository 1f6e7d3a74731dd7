//! auto-next - Advance playback to the next track after a configurable time
//!
//! A host-hosted player extension built around a single countdown: while the
//! player is playing, a timer ticks down the configured number of seconds and
//! then commands a skip to the next track, over and over until playback
//! pauses or stops. The timeout is persisted as one line of text and survives
//! restarts.

pub mod config;
pub mod error;
pub mod events;
pub mod monitor;
pub mod player;
pub mod plugin;
pub mod timer;

// Re-export commonly used types
pub use config::{ConfigStore, TimeoutSeconds, DEFAULT_TIMEOUT_SECS};
pub use error::ConfigError;
pub use events::{MonitorEvent, MonitorHandle};
pub use monitor::PlaybackMonitor;
pub use player::{HostNotification, PlayState, PlayerControl};
pub use plugin::Plugin;
pub use timer::{IdleTimer, TimerState};

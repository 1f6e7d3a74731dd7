//! Messages into the playback monitor
//!
//! Every notification handler, timer expiry, and settings change enters the
//! monitor through one mpsc queue, so all mutation of timer and timeout state
//! is serialized on the monitor task. [`MonitorHandle`] is the cloneable
//! sending side handed to the host wrappers.

use tokio::sync::{mpsc, oneshot};
use tracing::warn;

use crate::config::TimeoutSeconds;
use crate::error::ConfigError;
use crate::player::{HostNotification, PlayState};

/// Depth of the monitor's event queue
pub(crate) const EVENT_QUEUE_DEPTH: usize = 32;

/// Events processed by the playback monitor task
#[derive(Debug)]
pub enum MonitorEvent {
    /// Host finished loading the plugin
    Startup,
    /// Current track changed (observational only)
    TrackChanged,
    /// Player transitioned to a new play state
    PlayStateChanged(PlayState),
    /// A countdown generation elapsed
    TimerExpired { generation: u64 },
    /// User applied a new, already-validated timeout from the settings panel
    ApplyTimeout {
        timeout: TimeoutSeconds,
        reply: oneshot::Sender<Result<(), ConfigError>>,
    },
    /// Report the currently configured timeout
    GetTimeout {
        reply: oneshot::Sender<TimeoutSeconds>,
    },
    /// Stop the timer and end the monitor task
    Shutdown,
}

/// Cloneable sender used by the host-facing wrappers to reach the monitor
#[derive(Debug, Clone)]
pub struct MonitorHandle {
    tx: mpsc::Sender<MonitorEvent>,
}

impl MonitorHandle {
    pub(crate) fn new(tx: mpsc::Sender<MonitorEvent>) -> Self {
        Self { tx }
    }

    /// Forward a host lifecycle notification
    pub async fn notify(&self, notification: HostNotification) {
        let event = match notification {
            HostNotification::Startup => MonitorEvent::Startup,
            HostNotification::TrackChanged => MonitorEvent::TrackChanged,
            HostNotification::PlayStateChanged(state) => MonitorEvent::PlayStateChanged(state),
        };
        self.send(event).await;
    }

    /// Apply a new timeout: update in-memory state, rearm the countdown, and
    /// persist. A returned error is a write failure; the new value is still
    /// in effect for the current session.
    pub async fn apply_timeout(&self, timeout: TimeoutSeconds) -> Result<(), ConfigError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(MonitorEvent::ApplyTimeout {
            timeout,
            reply: reply_tx,
        })
        .await;
        // a closed channel means the monitor is already gone; nothing to apply
        reply_rx.await.unwrap_or(Ok(()))
    }

    /// Currently configured timeout (default if the monitor is gone)
    pub async fn timeout(&self) -> TimeoutSeconds {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(MonitorEvent::GetTimeout { reply: reply_tx }).await;
        reply_rx.await.unwrap_or_default()
    }

    /// Stop the countdown and end the monitor task
    pub async fn shutdown(&self) {
        self.send(MonitorEvent::Shutdown).await;
    }

    async fn send(&self, event: MonitorEvent) {
        if self.tx.send(event).await.is_err() {
            warn!("Playback monitor is not running, event dropped");
        }
    }
}

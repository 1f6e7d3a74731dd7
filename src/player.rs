//! Host player collaborator surface
//!
//! The host implements [`PlayerControl`]; the engine only ever queries the
//! current play state and issues a best-effort skip command.

/// Play state as reported by the host player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Playing,
    Paused,
    Stopped,
}

impl PlayState {
    /// Check whether playback is actively running
    pub fn is_playing(&self) -> bool {
        matches!(self, PlayState::Playing)
    }
}

/// Commands and queries the engine needs from the host player
pub trait PlayerControl: Send + Sync {
    /// Query the current play state
    fn play_state(&self) -> PlayState;

    /// Skip to the next track. Best-effort; no result is consulted.
    fn next_track(&self);
}

/// Lifecycle notifications delivered asynchronously by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostNotification {
    /// Plugin finished loading; settings should be read and the timer armed
    Startup,
    /// The current track changed (observational, does not touch the timer)
    TrackChanged,
    /// The player transitioned to a new play state
    PlayStateChanged(PlayState),
}

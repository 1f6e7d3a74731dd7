//! Playback monitor — the orchestrator behind the automatic skip
//!
//! Owns the countdown timer and the configured timeout, and reacts to host
//! notifications: transitions into Playing arm the countdown, transitions out
//! stop it, and an expiry while still Playing commands a skip to the next
//! track. Runs as a single task draining the event queue, so handlers and
//! timer expiries never race.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::{ConfigStore, TimeoutSeconds};
use crate::error::ConfigError;
use crate::events::{MonitorEvent, MonitorHandle, EVENT_QUEUE_DEPTH};
use crate::player::{PlayState, PlayerControl};
use crate::timer::IdleTimer;

/// Single-timer state machine advancing playback after the configured time
pub struct PlaybackMonitor {
    player: Arc<dyn PlayerControl>,
    config: ConfigStore,
    timeout: TimeoutSeconds,
    timer: IdleTimer,
    rx: mpsc::Receiver<MonitorEvent>,
}

impl PlaybackMonitor {
    /// Build a monitor and the handle used to send events into it
    ///
    /// The monitor starts with the compiled-in default timeout; the persisted
    /// value is read when the startup notification arrives.
    pub fn new(player: Arc<dyn PlayerControl>, config: ConfigStore) -> (Self, MonitorHandle) {
        let (tx, rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
        let timer = IdleTimer::new(tx.clone());
        let monitor = Self {
            player,
            config,
            timeout: TimeoutSeconds::default(),
            timer,
            rx,
        };
        (monitor, MonitorHandle::new(tx))
    }

    /// Drain the event queue until shutdown
    pub async fn run(mut self) {
        info!("Playback monitor started");
        while let Some(event) = self.rx.recv().await {
            match event {
                MonitorEvent::Startup => self.on_startup(),
                MonitorEvent::TrackChanged => self.on_track_changed(),
                MonitorEvent::PlayStateChanged(state) => self.on_play_state_changed(state),
                MonitorEvent::TimerExpired { generation } => self.on_timer_expired(generation),
                MonitorEvent::ApplyTimeout { timeout, reply } => {
                    let _ = reply.send(self.apply_timeout(timeout));
                }
                MonitorEvent::GetTimeout { reply } => {
                    let _ = reply.send(self.timeout);
                }
                MonitorEvent::Shutdown => {
                    self.timer.stop();
                    break;
                }
            }
        }
        info!("Playback monitor stopped");
    }

    /// Load the persisted timeout and arm the countdown, then leave the timer
    /// stopped if playback is not actually running yet
    fn on_startup(&mut self) {
        match self.config.load() {
            Ok(timeout) => self.timeout = timeout,
            Err(e) => {
                warn!("Could not load settings, keeping {}s: {}", self.timeout, e);
            }
        }

        self.timer.arm(self.timeout.duration());
        let state = self.player.play_state();
        if !state.is_playing() {
            // the arm above set everything up; dormant until playback starts
            self.timer.stop();
        }
        info!(
            "Started with a {}s timeout, player is {:?}",
            self.timeout, state
        );
    }

    /// Every transition into Playing restarts the full countdown window;
    /// leaving Playing stops it
    fn on_play_state_changed(&mut self, state: PlayState) {
        match state {
            PlayState::Playing => {
                debug!("Playback started, arming {}s countdown", self.timeout);
                self.timer.arm(self.timeout.duration());
            }
            PlayState::Paused | PlayState::Stopped => {
                debug!("Playback {:?}, stopping countdown", state);
                self.timer.stop();
            }
        }
    }

    /// A track change alone never resets the countdown; only a play-state
    /// transition does
    fn on_track_changed(&mut self) {
        debug!("Track changed, countdown untouched");
    }

    /// Countdown elapsed: skip if still playing, otherwise go dormant
    fn on_timer_expired(&mut self, generation: u64) {
        if !self.timer.is_current(generation) {
            debug!("Ignoring stale expiry for generation {}", generation);
            return;
        }

        if self.player.play_state().is_playing() {
            info!("{}s of playback elapsed, skipping to next track", self.timeout);
            self.player.next_track();
            // timer stays running and will fire again after a full interval
        } else {
            debug!("Playback no longer active at expiry, stopping countdown");
            self.timer.stop();
        }
    }

    /// Apply a validated timeout: take it into effect, rearm, then persist
    ///
    /// The countdown is rearmed regardless of play state; a countdown started
    /// while paused simply finds playback inactive at expiry and stops itself.
    /// A write failure is reported but the new value stays in effect.
    fn apply_timeout(&mut self, timeout: TimeoutSeconds) -> Result<(), ConfigError> {
        self.timeout = timeout;
        self.timer.arm(timeout.duration());
        self.config.save(timeout)
    }
}

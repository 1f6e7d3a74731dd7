//! Countdown timer driving the automatic skip
//!
//! A single timer that, once armed, posts an expiry event into the monitor
//! queue every time the configured duration elapses. Cancellation uses a
//! monotonic arm generation: `stop()` and every rearm bump the generation, so
//! an expiry already queued for an older generation is recognized as stale
//! and never acts.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use crate::events::MonitorEvent;

/// Whether the countdown is actively ticking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Stopped,
    Running,
}

#[derive(Debug)]
struct TimerInner {
    generation: u64,
    state: TimerState,
}

/// Single rearm-able countdown
///
/// Cloning shares the same underlying timer; the clone held by each spawned
/// countdown task observes generation bumps made through any other clone.
#[derive(Debug, Clone)]
pub struct IdleTimer {
    inner: Arc<Mutex<TimerInner>>,
    expiry_tx: mpsc::Sender<MonitorEvent>,
}

impl IdleTimer {
    /// Create a stopped timer that reports expiries on the given queue
    pub fn new(expiry_tx: mpsc::Sender<MonitorEvent>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(TimerInner {
                generation: 0,
                state: TimerState::Stopped,
            })),
            expiry_tx,
        }
    }

    /// Start (or restart) the countdown
    ///
    /// Always resets the elapsed time to zero and leaves the timer Running.
    /// A previously armed countdown is invalidated by the generation bump and
    /// its task winds down on its next wakeup.
    pub fn arm(&self, duration: Duration) {
        let generation = {
            let mut inner = self.lock();
            inner.generation += 1;
            inner.state = TimerState::Running;
            inner.generation
        };
        debug!(
            "Arming countdown generation {} for {:?}",
            generation, duration
        );

        let timer = self.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(duration).await;
                if !timer.is_current(generation) {
                    break;
                }
                if timer
                    .expiry_tx
                    .send(MonitorEvent::TimerExpired { generation })
                    .await
                    .is_err()
                {
                    // monitor is gone, nothing left to notify
                    break;
                }
            }
        });
    }

    /// Stop the countdown; a no-op when already stopped
    ///
    /// After this returns, no expiry from an earlier arm can act: the monitor
    /// checks the generation before issuing a skip.
    pub fn stop(&self) {
        let mut inner = self.lock();
        if inner.state == TimerState::Running {
            inner.generation += 1;
            inner.state = TimerState::Stopped;
            debug!("Countdown stopped");
        }
    }

    /// Current running/stopped state
    pub fn state(&self) -> TimerState {
        self.lock().state
    }

    /// Check whether a generation is still the live, running countdown
    pub fn is_current(&self, generation: u64) -> bool {
        let inner = self.lock();
        inner.state == TimerState::Running && inner.generation == generation
    }

    #[cfg(test)]
    pub(crate) fn current_generation(&self) -> u64 {
        self.lock().generation
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TimerInner> {
        // the lock is only held for a handful of field accesses; a poisoned
        // state is still internally consistent
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    fn expired_generation(event: Option<MonitorEvent>) -> u64 {
        match event {
            Some(MonitorEvent::TimerExpired { generation }) => generation,
            other => panic!("expected TimerExpired, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn arm_fires_after_the_duration() {
        let (tx, mut rx) = mpsc::channel(8);
        let timer = IdleTimer::new(tx);

        timer.arm(Duration::from_millis(20));
        assert_eq!(timer.state(), TimerState::Running);

        let event = timeout(Duration::from_millis(500), rx.recv())
            .await
            .expect("countdown did not fire");
        let generation = expired_generation(event);
        assert!(timer.is_current(generation));
    }

    #[tokio::test]
    async fn armed_timer_fires_repeatedly() {
        let (tx, mut rx) = mpsc::channel(8);
        let timer = IdleTimer::new(tx);

        timer.arm(Duration::from_millis(20));
        for _ in 0..3 {
            timeout(Duration::from_millis(500), rx.recv())
                .await
                .expect("countdown did not re-fire");
        }
        assert_eq!(timer.state(), TimerState::Running);
    }

    #[tokio::test]
    async fn stop_before_expiry_prevents_the_fire() {
        let (tx, mut rx) = mpsc::channel(8);
        let timer = IdleTimer::new(tx);

        timer.arm(Duration::from_millis(80));
        timer.stop();
        assert_eq!(timer.state(), TimerState::Stopped);

        let fired = timeout(Duration::from_millis(200), rx.recv()).await;
        assert!(fired.is_err(), "stopped countdown still fired: {:?}", fired);
    }

    #[tokio::test]
    async fn rearm_resets_the_elapsed_time() {
        let (tx, mut rx) = mpsc::channel(8);
        let timer = IdleTimer::new(tx);

        timer.arm(Duration::from_millis(120));
        tokio::time::sleep(Duration::from_millis(60)).await;
        timer.arm(Duration::from_millis(120));

        // the original countdown would have fired by now; the rearmed one not yet
        let early = timeout(Duration::from_millis(80), rx.recv()).await;
        assert!(early.is_err(), "rearm did not reset the countdown");

        let event = timeout(Duration::from_millis(500), rx.recv())
            .await
            .expect("rearmed countdown never fired");
        assert!(timer.is_current(expired_generation(event)));
    }

    #[tokio::test]
    async fn queued_expiry_for_a_stopped_generation_is_stale() {
        let (tx, mut rx) = mpsc::channel(8);
        let timer = IdleTimer::new(tx);

        timer.arm(Duration::from_millis(10));
        let event = timeout(Duration::from_millis(500), rx.recv())
            .await
            .expect("countdown did not fire");
        let generation = expired_generation(event);

        // stop lands after the expiry was queued; the generation must read stale
        timer.stop();
        assert!(!timer.is_current(generation));
    }

    #[tokio::test]
    async fn stop_when_already_stopped_is_a_no_op() {
        let (tx, _rx) = mpsc::channel(8);
        let timer = IdleTimer::new(tx);

        let before = timer.current_generation();
        timer.stop();
        assert_eq!(timer.current_generation(), before);
        assert_eq!(timer.state(), TimerState::Stopped);
    }
}

//! Simulation harness for the auto-next plugin
//!
//! Drives the plugin against an in-process fake player so the skip behavior
//! can be watched without a real host: starts playback, lets the countdown
//! fire, and shuts down cleanly on Ctrl-C.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use clap::Parser;
use futures::stream::StreamExt;
use signal_hook_tokio::Signals;
use tracing::info;

use auto_next::{HostNotification, PlayState, PlayerControl, Plugin};

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "auto-next-sim")]
#[command(about = "Run the auto-next plugin against a simulated player")]
#[command(version)]
struct Args {
    /// Seconds of playback before each skip (persisted for the next run)
    #[arg(short, long)]
    timeout: Option<u32>,

    /// Directory holding the persisted settings file
    #[arg(short, long, default_value = "./auto-next-sim")]
    data_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

/// In-process stand-in for the host player
struct FakePlayer {
    state: Mutex<PlayState>,
    playlist: Vec<&'static str>,
    position: AtomicUsize,
}

impl FakePlayer {
    fn new() -> Self {
        Self {
            state: Mutex::new(PlayState::Stopped),
            playlist: vec![
                "Morning Lights",
                "Static Bloom",
                "Half Past Nine",
                "Copper Wires",
                "Last Bus Home",
            ],
            position: AtomicUsize::new(0),
        }
    }

    fn set_state(&self, state: PlayState) {
        *self.state.lock().unwrap() = state;
    }

    fn current_title(&self) -> &'static str {
        self.playlist[self.position.load(Ordering::SeqCst) % self.playlist.len()]
    }
}

impl PlayerControl for FakePlayer {
    fn play_state(&self) -> PlayState {
        *self.state.lock().unwrap()
    }

    fn next_track(&self) {
        self.position.fetch_add(1, Ordering::SeqCst);
        info!("Player now playing: {}", self.current_title());
    }
}

/// Wait for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let mut signals = Signals::new([signal_hook::consts::SIGTERM, signal_hook::consts::SIGINT])
        .expect("Failed to create signal handler");

    if let Some(signal) = signals.next().await {
        info!("Received signal: {}", signal);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "auto_next={level},simulate={level}",
            level = args.log_level()
        ))
        .init();

    std::fs::create_dir_all(&args.data_dir)?;

    let player = Arc::new(FakePlayer::new());
    let plugin = Plugin::new(Arc::clone(&player) as Arc<dyn PlayerControl>, &args.data_dir);

    let info = plugin.info();
    info!(
        "Starting {} v{}.{}.{} (settings in {})",
        info.name,
        info.version.major,
        info.version.minor,
        info.version.revision,
        args.data_dir.display()
    );

    plugin.receive_notification(HostNotification::Startup).await;

    if let Some(secs) = args.timeout {
        plugin.save_settings(&secs.to_string()).await?;
        info!("Applied timeout override of {}s", secs);
    }

    player.set_state(PlayState::Playing);
    plugin
        .receive_notification(HostNotification::PlayStateChanged(PlayState::Playing))
        .await;
    info!(
        "Player now playing: {} (skips every {}s, Ctrl-C to stop)",
        player.current_title(),
        plugin.configure().await.input()
    );

    shutdown_signal().await;

    player.set_state(PlayState::Stopped);
    plugin
        .receive_notification(HostNotification::PlayStateChanged(PlayState::Stopped))
        .await;
    plugin.close().await;

    info!("Simulation shutdown complete");
    Ok(())
}

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::warn;

use crate::error::EngineError;

use super::thread::spawn_audio_thread;
use super::types::{EngineCmd, EngineEvent, PlaybackEngine};

/// The rodio-backed engine. Commands go to a dedicated audio thread; its
/// notifications come back on the receiver returned by [`AudioPlayer::spawn`].
pub struct AudioPlayer {
    tx: Sender<EngineCmd>,
    join: Option<JoinHandle<()>>,
}

impl AudioPlayer {
    /// Start the audio thread. Position notifications arrive at most once per
    /// `notify_interval` while playing.
    pub fn spawn(notify_interval: Duration) -> (Self, Receiver<EngineEvent>) {
        let (tx, rx) = mpsc::channel::<EngineCmd>();
        let (events_tx, events_rx) = mpsc::channel::<EngineEvent>();
        let join = spawn_audio_thread(rx, events_tx, notify_interval);
        (
            Self {
                tx,
                join: Some(join),
            },
            events_rx,
        )
    }
}

impl PlaybackEngine for AudioPlayer {
    fn send(&mut self, cmd: EngineCmd) -> Result<(), EngineError> {
        self.tx.send(cmd).map_err(|_| EngineError::Disconnected)
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        // Already gone if a Shutdown was sent earlier.
        let _ = self.tx.send(EngineCmd::Shutdown { fade_out_ms: 0 });
        if let Some(h) = self.join.take() {
            if h.join().is_err() {
                warn!("audio thread panicked");
            }
        }
    }
}

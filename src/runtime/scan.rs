use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};

use tracing::{debug, info};

use crate::audio::PlaybackEngine;
use crate::config::LibrarySettings;
use crate::controller::PlaybackController;
use crate::library::{ScanMessage, ScanWorker};

/// Tracks the current background scan and hands its result to the controller.
pub struct ScanState {
    root: PathBuf,
    settings: LibrarySettings,
    generation: u64,
    worker: Option<ScanWorker>,
    tx: Sender<ScanMessage>,
    rx: Receiver<ScanMessage>,
    /// Played once the first scan completes.
    initial_track: Option<PathBuf>,
}

impl ScanState {
    pub fn start(root: PathBuf, settings: LibrarySettings, initial_track: Option<PathBuf>) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut state = Self {
            root,
            settings,
            generation: 0,
            worker: None,
            tx,
            rx,
            initial_track,
        };
        state.spawn();
        state
    }

    #[cfg(test)]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_scanning(&self) -> bool {
        self.worker.is_some()
    }

    /// Cancel any scan in flight and start over.
    pub fn rescan(&mut self) {
        if let Some(worker) = self.worker.take() {
            debug!(generation = worker.generation(), "cancelling scan");
            worker.cancel();
        }
        self.spawn();
    }

    fn spawn(&mut self) {
        self.generation += 1;
        info!(root = %self.root.display(), generation = self.generation, "scanning");
        self.worker = Some(ScanWorker::spawn(
            self.generation,
            self.root.clone(),
            self.settings.clone(),
            self.tx.clone(),
        ));
    }

    /// Deliver finished scans. Results from superseded scans are dropped.
    pub fn poll<E: PlaybackEngine>(&mut self, controller: &mut PlaybackController<E>) {
        while let Ok(msg) = self.rx.try_recv() {
            if msg.generation != self.generation {
                debug!(stale = msg.generation, current = self.generation, "ignoring stale scan");
                continue;
            }
            self.worker = None;
            controller.playlist_ready(msg.root, msg.result);
            if let Some(path) = self.initial_track.take() {
                controller.select_initial_track(&path);
            }
        }
    }
}

impl Drop for ScanState {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.cancel_and_join();
        }
    }
}

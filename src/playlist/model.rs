use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

use tracing::debug;

use crate::library::Track;

/// Structural change notifications sent to playlist observers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ModelEvent {
    /// Every row was replaced; observers must drop any per-row state.
    Reset { rows: usize },
}

/// Ordered tracks in scan order, plus the index of the loaded track.
///
/// Invariant: `current`, when set, is a valid index into `tracks`.
#[derive(Debug, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
    current: Option<usize>,
    root: Option<PathBuf>,
    observers: Vec<Sender<ModelEvent>>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a freshly scanned track list. Clears the current index and
    /// signals a reset to every observer.
    pub fn replace(&mut self, root: Option<PathBuf>, tracks: Vec<Track>) {
        self.tracks = tracks;
        self.current = None;
        self.root = root;

        let event = ModelEvent::Reset {
            rows: self.tracks.len(),
        };
        // Receivers that went away are pruned here.
        self.observers.retain(|tx| tx.send(event).is_ok());
        debug!(rows = self.tracks.len(), "playlist replaced");
    }

    /// Register for structural change notifications.
    pub fn subscribe(&mut self) -> Receiver<ModelEvent> {
        let (tx, rx) = mpsc::channel();
        self.observers.push(tx);
        rx
    }

    #[cfg(test)]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Directory the tracks were scanned from, if any.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    /// Select `index` as the loaded track. Returns `false` (and changes
    /// nothing) when the index is out of range.
    pub fn set_current(&mut self, index: usize) -> bool {
        if index < self.tracks.len() {
            self.current = Some(index);
            true
        } else {
            false
        }
    }

    /// Store a duration learned from the engine for the track at `index`.
    pub fn record_duration(&mut self, index: usize, duration_ms: u64) {
        if let Some(slot) = self.tracks.get_mut(index) {
            if slot.duration_ms() != Some(duration_ms) {
                *slot = slot.with_duration(duration_ms);
            }
        }
    }

    pub fn position_of(&self, path: &Path) -> Option<usize> {
        self.tracks.iter().position(|t| t.path() == path)
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.tracks.iter().map(|t| t.path().to_path_buf()).collect()
    }
}

//! Background directory scanning.
//!
//! A scan can take a while on slow disks, so it runs on its own thread and
//! hands the finished playlist back as one message.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use tracing::debug;

use crate::config::LibrarySettings;
use crate::error::LibraryError;

use super::model::Track;
use super::scan::scan_cancellable;

/// The outcome of one background scan.
#[derive(Debug)]
pub struct ScanMessage {
    /// Identifies the scan that produced this result.
    pub generation: u64,
    pub root: PathBuf,
    pub result: Result<Vec<Track>, LibraryError>,
}

/// Handle to a scan running on a background thread.
///
/// Dropping the handle cancels the scan; a cancelled scan sends nothing.
pub struct ScanWorker {
    generation: u64,
    cancel: Arc<AtomicBool>,
    join: Option<JoinHandle<()>>,
}

impl ScanWorker {
    pub fn spawn(
        generation: u64,
        root: PathBuf,
        settings: LibrarySettings,
        tx: Sender<ScanMessage>,
    ) -> Self {
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = cancel.clone();

        let join = thread::spawn(move || {
            let result = scan_cancellable(&root, &settings, &flag);
            if flag.load(Ordering::Relaxed) || matches!(result, Err(LibraryError::Cancelled)) {
                debug!(generation, "discarding cancelled scan");
                return;
            }
            let _ = tx.send(ScanMessage {
                generation,
                root,
                result,
            });
        });

        Self {
            generation,
            cancel,
            join: Some(join),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Ask the scan to stop at the next entry.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Cancel and wait for the thread to exit.
    pub fn cancel_and_join(mut self) {
        self.cancel();
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }

    /// Wait for the scan to finish without cancelling it.
    #[cfg(test)]
    pub fn join(mut self) {
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

impl Drop for ScanWorker {
    fn drop(&mut self) {
        self.cancel();
    }
}

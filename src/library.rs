//! Music library: turns a directory tree into an ordered list of tracks.
//!
//! `scan` does the walking; `ScanWorker` runs it off the UI thread.

mod model;
mod probe;
mod scan;
mod worker;

pub use model::Track;
pub use probe::probe_duration_ms;
pub use scan::scan;
pub use worker::{ScanMessage, ScanWorker};

#[cfg(test)]
mod tests;

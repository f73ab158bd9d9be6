//! Error types shared by the library scanner and the playback engine.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a playlist from a directory tree.
#[derive(Error, Debug)]
pub enum LibraryError {
    /// The scan root is missing, unreadable or not a directory.
    #[error("music directory unavailable: {}: {source}", path.display())]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A single entry could not be read; the scan skips it.
    #[error("skipping unreadable entry {}: {source}", path.display())]
    EntryUnreadable {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    /// The scan was cancelled before it finished.
    #[error("scan cancelled")]
    Cancelled,
}

/// Errors raised by the playback engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine thread has exited and no longer accepts commands.
    #[error("playback engine is not running")]
    Disconnected,
    /// No audio output device could be opened.
    #[error("no audio output device: {reason}")]
    Output { reason: String },
    /// A track could not be opened or decoded.
    #[error("cannot play {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },
    /// A command referenced a track the engine does not know about.
    #[error("no track at index {index}")]
    NoSuchTrack { index: usize },
}

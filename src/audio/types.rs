//! Engine vocabulary: the commands it accepts and the notifications it emits.
//!
//! Both directions are plain values so the controller can be driven and
//! observed without a real audio device.

use std::path::PathBuf;

use crate::error::EngineError;

/// What the engine is doing.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Transport {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCmd {
    /// Replace the engine's track list. Stops playback.
    SetPlaylist(Vec<PathBuf>),
    /// Load the track at the given playlist index.
    SetCurrentTrack(usize),
    /// Start the loaded track, or resume it when paused.
    Play,
    Pause,
    /// Stop playback and rewind. A no-op when already stopped.
    Stop,
    /// Seek within the loaded track (milliseconds).
    SetPosition(u64),
    /// Output volume, 0-100.
    SetVolume(u8),
    SetMuted(bool),
    /// Fade out over `fade_out_ms`, stop and exit the engine thread.
    Shutdown { fade_out_ms: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    TransportChanged(Transport),
    /// Playback position of the loaded track (milliseconds).
    PositionChanged(u64),
    /// Length of the loaded track (milliseconds); 0 when unknown.
    DurationChanged(u64),
    VolumeChanged(u8),
    MutedChanged(bool),
    /// The loaded track played to its end.
    TrackFinished,
    /// The loaded track cannot be played.
    PlaybackError { reason: String },
}

/// Anything that accepts engine commands.
pub trait PlaybackEngine {
    fn send(&mut self, cmd: EngineCmd) -> Result<(), EngineError>;
}

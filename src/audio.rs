//! Audio playback on a dedicated thread.
//!
//! `AudioPlayer` owns the rodio output and talks to the rest of the program
//! only through [`EngineCmd`] and [`EngineEvent`] messages. The controller
//! depends on the [`PlaybackEngine`] trait, not on rodio.

mod player;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
pub use types::{EngineCmd, EngineEvent, PlaybackEngine, Transport};

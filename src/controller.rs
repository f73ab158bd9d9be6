//! Playback controller: mediates between the UI and the playback engine.
//!
//! User gestures come in through the controller's input methods and become
//! [`EngineCmd`](crate::audio::EngineCmd)s; engine notifications come in
//! through `apply` and only ever update displayed state.

mod model;
mod order;
mod state;

pub use model::{ControllerSettings, PlaybackController};
pub use order::PlayOrder;
pub use state::{Controls, PlaybackState, ToggleButton};

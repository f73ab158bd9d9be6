//! The playlist and its table projection.
//!
//! `Playlist` is the ordered track list plus the current selection, owned by
//! the controller. `PlaylistModel` is the read-only two-column view the UI
//! renders from it.

mod model;
mod table;

pub use model::{ModelEvent, Playlist};
pub use table::{Column, PlaylistModel};

#[cfg(test)]
mod tests;

use crate::slider::Orientation;
use crate::time::format_ms;

use super::model::Playlist;

/// Columns of the playlist table, in display order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Column {
    Name,
    Duration,
}

impl Column {
    pub const ALL: [Column; 2] = [Column::Name, Column::Duration];

    pub fn from_index(section: usize) -> Option<Self> {
        Self::ALL.get(section).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            Column::Name => "file name",
            Column::Duration => "time",
        }
    }
}

/// Read-only table view over a [`Playlist`].
///
/// One row per track; the vertical header numbers rows from 1.
pub struct PlaylistModel<'a> {
    playlist: &'a Playlist,
    relative_paths: bool,
}

impl<'a> PlaylistModel<'a> {
    pub fn new(playlist: &'a Playlist) -> Self {
        Self {
            playlist,
            relative_paths: false,
        }
    }

    /// Render names relative to the playlist's scan root when possible.
    pub fn relative_paths(mut self, relative: bool) -> Self {
        self.relative_paths = relative;
        self
    }

    pub fn row_count(&self) -> usize {
        self.playlist.len()
    }

    #[cfg(test)]
    pub fn column_count(&self) -> usize {
        Column::ALL.len()
    }

    pub fn header_data(&self, section: usize, orientation: Orientation) -> Option<String> {
        match orientation {
            Orientation::Horizontal => Column::from_index(section).map(|c| c.title().to_string()),
            Orientation::Vertical => {
                (section < self.row_count()).then(|| (section + 1).to_string())
            }
        }
    }

    /// Cell text, or `None` outside the table.
    pub fn data(&self, row: usize, column: Column) -> Option<String> {
        let track = self.playlist.get(row)?;
        let text = match column {
            Column::Name => {
                let path = track.path();
                let shown = if self.relative_paths {
                    self.playlist
                        .root()
                        .and_then(|root| path.strip_prefix(root).ok())
                        .unwrap_or(path)
                } else {
                    path
                };
                shown.display().to_string()
            }
            Column::Duration => track.duration_ms().map(format_ms).unwrap_or_default(),
        };
        Some(text)
    }
}

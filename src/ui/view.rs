//! UI-side state that survives between frames: table selection and the
//! screen areas the last frame drew interactive parts into.

use ratatui::layout::{Position, Rect};
use ratatui::widgets::TableState;

use crate::playlist::ModelEvent;

/// A clickable button in the controls row.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Button {
    PlayPause,
    Stop,
    Next,
    Previous,
    Mute,
    Repeat,
    Shuffle,
}

impl Button {
    pub const ALL: [Button; 7] = [
        Button::PlayPause,
        Button::Stop,
        Button::Next,
        Button::Previous,
        Button::Mute,
        Button::Repeat,
        Button::Shuffle,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Button::PlayPause => "play",
            Button::Stop => "stop",
            Button::Next => "next",
            Button::Previous => "prev",
            Button::Mute => "mute",
            Button::Repeat => "repeat",
            Button::Shuffle => "shuffle",
        }
    }
}

/// Where the last frame put each interactive element.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HitAreas {
    pub buttons: Vec<(Button, Rect)>,
    pub volume: Option<Rect>,
    pub seek: Option<Rect>,
    /// Table body, below the header row.
    pub rows: Option<Rect>,
}

impl HitAreas {
    pub fn button_at(&self, x: u16, y: u16) -> Option<Button> {
        self.buttons
            .iter()
            .find(|(_, area)| area.contains(Position::new(x, y)))
            .map(|(button, _)| *button)
    }
}

#[derive(Debug, Default)]
pub struct ViewState {
    pub table: TableState,
    pub hit: HitAreas,
    /// A directory scan is in flight.
    pub scanning: bool,
}

impl ViewState {
    pub fn selected(&self) -> Option<usize> {
        self.table.selected()
    }

    /// Apply a playlist notification. A reset drops selection and scrolling.
    pub fn on_model_event(&mut self, event: ModelEvent) {
        match event {
            ModelEvent::Reset { rows } => {
                self.table = TableState::default();
                if rows > 0 {
                    self.table.select(Some(0));
                }
            }
        }
    }

    pub fn select(&mut self, row: usize, rows: usize) {
        if row < rows {
            self.table.select(Some(row));
        }
    }

    pub fn select_next(&mut self, rows: usize) {
        if rows == 0 {
            return;
        }
        let next = self.selected().map_or(0, |i| (i + 1).min(rows - 1));
        self.table.select(Some(next));
    }

    pub fn select_previous(&mut self, rows: usize) {
        if rows == 0 {
            return;
        }
        let prev = self.selected().map_or(0, |i| i.saturating_sub(1));
        self.table.select(Some(prev));
    }

    pub fn select_first(&mut self, rows: usize) {
        self.select(0, rows);
    }

    pub fn select_last(&mut self, rows: usize) {
        if let Some(last) = rows.checked_sub(1) {
            self.table.select(Some(last));
        }
    }

    /// The playlist row drawn at screen cell `(x, y)`, if any.
    pub fn row_at(&self, x: u16, y: u16, rows: usize) -> Option<usize> {
        let area = self.hit.rows?;
        if !area.contains(Position::new(x, y)) {
            return None;
        }
        let row = self.table.offset() + usize::from(y - area.y);
        (row < rows).then_some(row)
    }
}

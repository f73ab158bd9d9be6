//! A single-axis integer slider with click-to-jump semantics.
//!
//! Used for both the seek bar and the volume bar. The slider separates the
//! two directions data can flow through it:
//!
//! - user input (`handle_pointer`, `step_by`) queues [`UserChange`]s that the
//!   owner drains with `take_changes`;
//! - programmatic updates (`set_value`, `set_range`) never queue anything, so
//!   pushing engine state into the slider cannot echo back as a user command.

mod behavior;

pub use behavior::{ClickBehavior, JumpToPointer, PageStep};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// The slider's value and presentation at one instant.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ControlSnapshot {
    pub value: i64,
    pub min: i64,
    pub max: i64,
    pub orientation: Orientation,
    pub inverted: bool,
}

/// Size of the area the slider is drawn in, in terminal cells.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Geometry {
    pub width: u16,
    pub height: u16,
}

impl Geometry {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A cell position relative to the slider's top-left corner.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Pointer {
    Press(Point),
    Drag(Point),
    Release(Point),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PointerOutcome {
    /// The slider consumed the event.
    Handled,
    /// Not for this slider (e.g. a drag without a preceding press).
    Ignored,
}

/// A value committed by direct user interaction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UserChange {
    pub value: i64,
}

#[derive(Debug, Copy, Clone)]
struct Grab {
    origin: Point,
    start: i64,
}

#[derive(Debug)]
pub struct SeekableSlider {
    min: i64,
    max: i64,
    value: i64,
    /// Where the handle is drawn; differs from `value` only while grabbed.
    position: i64,
    orientation: Orientation,
    inverted: bool,
    tracking: bool,
    grab: Option<Grab>,
    click: Box<dyn ClickBehavior>,
    changes: Vec<UserChange>,
}

impl SeekableSlider {
    /// A horizontal, tracking slider over `[min, max]` starting at `min`.
    pub fn new(min: i64, max: i64) -> Self {
        let max = max.max(min);
        Self {
            min,
            max,
            value: min,
            position: min,
            orientation: Orientation::Horizontal,
            inverted: false,
            tracking: true,
            grab: None,
            click: Box::new(JumpToPointer),
            changes: Vec::new(),
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_inverted_appearance(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// Without tracking, a drag only commits when the handle is released.
    pub fn with_tracking(mut self, tracking: bool) -> Self {
        self.tracking = tracking;
        self
    }

    pub fn with_click_behavior(mut self, click: Box<dyn ClickBehavior>) -> Self {
        self.click = click;
        self
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn position(&self) -> i64 {
        self.position
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    #[cfg(test)]
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// True while the user holds the handle.
    pub fn is_grabbed(&self) -> bool {
        self.grab.is_some()
    }

    pub fn snapshot(&self) -> ControlSnapshot {
        ControlSnapshot {
            value: self.value,
            min: self.min,
            max: self.max,
            orientation: self.orientation,
            inverted: self.inverted,
        }
    }

    /// Programmatic update. Never produces a [`UserChange`]. While the handle
    /// is grabbed only the value moves, not the drawn position.
    pub fn set_value(&mut self, value: i64) {
        self.value = value.clamp(self.min, self.max);
        if self.grab.is_none() {
            self.position = self.value;
        }
    }

    /// Programmatic range update; value and position are clamped silently.
    pub fn set_range(&mut self, min: i64, max: i64) {
        self.min = min;
        self.max = max.max(min);
        self.value = self.value.clamp(self.min, self.max);
        self.position = self.position.clamp(self.min, self.max);
    }

    /// Keyboard-style step, committed immediately as user input.
    pub fn step_by(&mut self, delta: i64) {
        let next = self.value.saturating_add(delta).clamp(self.min, self.max);
        self.commit(next);
    }

    /// Drain the user changes queued since the last call.
    pub fn take_changes(&mut self) -> Vec<UserChange> {
        std::mem::take(&mut self.changes)
    }

    pub fn handle_pointer(&mut self, event: Pointer, geometry: Geometry) -> PointerOutcome {
        match event {
            Pointer::Press(at) => {
                if self.handle_offset(geometry) != Some(self.axis(at)) {
                    let target = self
                        .click
                        .value_for_click(&self.snapshot(), geometry, at)
                        .clamp(self.min, self.max);
                    self.commit(target);
                }
                // The handle is now under the pointer either way, so the
                // press continues as a drag from here.
                self.grab = Some(Grab {
                    origin: at,
                    start: self.value,
                });
                PointerOutcome::Handled
            }
            Pointer::Drag(at) => {
                let Some(grab) = self.grab else {
                    return PointerOutcome::Ignored;
                };
                self.position = self.dragged_value(grab, at, geometry);
                if self.tracking && self.position != self.value {
                    self.commit(self.position);
                }
                PointerOutcome::Handled
            }
            Pointer::Release(at) => {
                let Some(grab) = self.grab.take() else {
                    return PointerOutcome::Ignored;
                };
                let released = self.dragged_value(grab, at, geometry);
                if released != grab.start {
                    self.commit(released);
                } else {
                    // Held without moving: snap back to whatever the value is now.
                    self.position = self.value;
                }
                PointerOutcome::Handled
            }
        }
    }

    /// Cell offset of the handle along the slider axis, measured from the
    /// left (horizontal) or top (vertical) edge.
    pub fn handle_offset(&self, geometry: Geometry) -> Option<u16> {
        let span = self.span(geometry);
        if span == 0 {
            return None;
        }
        let last = i64::from(span - 1);
        let range = self.max - self.min;
        let from_min = if range == 0 {
            0
        } else {
            (self.position - self.min) * last / range
        };

        // Cells counted from the edge where `min` sits.
        let toward_max = match (self.orientation, self.inverted) {
            (Orientation::Horizontal, false) | (Orientation::Vertical, true) => from_min,
            (Orientation::Horizontal, true) | (Orientation::Vertical, false) => last - from_min,
        };
        u16::try_from(toward_max).ok()
    }

    fn commit(&mut self, value: i64) {
        if self.grab.is_none() {
            self.position = value;
        }
        if value != self.value {
            self.value = value;
            self.changes.push(UserChange { value });
        }
    }

    fn dragged_value(&self, grab: Grab, at: Point, geometry: Geometry) -> i64 {
        let span = self.span(geometry);
        if span <= 1 {
            return grab.start;
        }
        let cells = i64::from(self.axis(at)) - i64::from(self.axis(grab.origin));
        let direction = match (self.orientation, self.inverted) {
            (Orientation::Horizontal, false) | (Orientation::Vertical, true) => 1,
            (Orientation::Horizontal, true) | (Orientation::Vertical, false) => -1,
        };
        let range = self.max - self.min;
        let delta = cells * direction * range / i64::from(span - 1);
        (grab.start + delta).clamp(self.min, self.max)
    }

    fn axis(&self, at: Point) -> u16 {
        match self.orientation {
            Orientation::Horizontal => at.x,
            Orientation::Vertical => at.y,
        }
    }

    fn span(&self, geometry: Geometry) -> u16 {
        match self.orientation {
            Orientation::Horizontal => geometry.width,
            Orientation::Vertical => geometry.height,
        }
    }
}

#[cfg(test)]
mod tests;

use std::fmt::Debug;

use super::{ControlSnapshot, Geometry, Orientation, Point};

/// Decides what a press on the slider track (not on the handle) does.
pub trait ClickBehavior: Debug {
    /// The value the slider takes after a press at `at`, in slider-local cells.
    fn value_for_click(&self, snapshot: &ControlSnapshot, geometry: Geometry, at: Point) -> i64;
}

/// Jump straight to the value under the pointer.
#[derive(Debug, Default, Copy, Clone)]
pub struct JumpToPointer;

impl ClickBehavior for JumpToPointer {
    fn value_for_click(&self, snapshot: &ControlSnapshot, geometry: Geometry, at: Point) -> i64 {
        let ControlSnapshot { min, max, .. } = *snapshot;
        let range = max - min;

        let value = match snapshot.orientation {
            Orientation::Horizontal => {
                if geometry.width == 0 {
                    return snapshot.value;
                }
                min + range * i64::from(at.x) / i64::from(geometry.width)
            }
            Orientation::Vertical => {
                if geometry.height == 0 {
                    return snapshot.value;
                }
                // Origin at the bottom edge.
                let from_bottom = i64::from(geometry.height) - i64::from(at.y);
                min + range * from_bottom / i64::from(geometry.height)
            }
        };

        let value = if snapshot.inverted { max - value } else { value };
        value.clamp(min, max)
    }
}

/// The conventional track click: move one page toward the pointer, without
/// passing it.
#[derive(Debug, Copy, Clone)]
pub struct PageStep {
    pub page: i64,
}

impl ClickBehavior for PageStep {
    fn value_for_click(&self, snapshot: &ControlSnapshot, geometry: Geometry, at: Point) -> i64 {
        let target = JumpToPointer.value_for_click(snapshot, geometry, at);
        let value = if target > snapshot.value {
            (snapshot.value + self.page).min(target)
        } else {
            (snapshot.value - self.page).max(target)
        };
        value.clamp(snapshot.min, snapshot.max)
    }
}

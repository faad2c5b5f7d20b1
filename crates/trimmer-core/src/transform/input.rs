//! Mapping slider, wheel and drag input onto [`TransformState`].
//!
//! Every mapper is a pure function of the previous state and the event, and
//! ends in one of the two state mutators (`set_scale` or `pan_by`), so the
//! shared clamping rules apply regardless of the input device.

use super::{Point, TransformState};

/// Raw wheel deltas as reported by the pointer device.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelDelta {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl WheelDelta {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// All three axes count toward zoom, so vertical mouse wheels,
    /// horizontal trackpad swipes and depth-capable devices all work.
    pub fn total(&self) -> f64 {
        self.x + self.y + self.z
    }
}

/// Apply a zoom slider value (percent).
#[must_use]
pub fn apply_slider(state: TransformState, value: f64) -> TransformState {
    state.set_scale(value)
}

/// Apply one wheel event: the summed delta times `sensitivity` is added to
/// the current zoom percent.
#[must_use]
pub fn apply_wheel(state: TransformState, delta: WheelDelta, sensitivity: f64) -> TransformState {
    state.set_scale(state.scale_percent() + delta.total() * sensitivity)
}

/// An in-progress drag, alive only while the pointer button is held.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    anchor: Point,
    start_focal: Point,
}

impl DragSession {
    /// Open a drag at `pointer`, remembering the focal point at press time.
    pub fn begin(pointer: Point, state: &TransformState) -> Self {
        Self {
            anchor: pointer,
            start_focal: state.focal(),
        }
    }

    /// Pointer position at press, in surface pixels.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Focal point at press, in image pixels.
    pub fn start_focal(&self) -> Point {
        self.start_focal
    }

    /// State for the pointer now being at `pointer`.
    ///
    /// Always computed from the press-time focal point, so any number of
    /// intermediate moves yields the same result as a single jump. The
    /// surface delta is divided by the scale in effect right now.
    #[must_use]
    pub fn drag_to(&self, state: TransformState, pointer: Point) -> TransformState {
        let scale = state.scale();
        let dx = (self.anchor.x - pointer.x) / scale;
        let dy = (self.anchor.y - pointer.y) / scale;
        state.with_focal(self.start_focal).pan_by(dx, dy)
    }

    /// Release at `pointer`: commits the same computation as
    /// [`drag_to`](Self::drag_to) and closes the session.
    #[must_use]
    pub fn end(self, state: TransformState, pointer: Point) -> TransformState {
        self.drag_to(state, pointer)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

//! Viewport transform state and the input mappers that drive it.
//!
//! # Coordinate System
//!
//! - Image space: natural image pixels, origin at the top-left corner
//! - Surface space: pixels of a render surface, origin at its top-left corner
//! - A surface shows image point `focal` at its center, so image point `p`
//!   lands at `center + (p - focal) * scale`

mod input;
mod state;

pub use input::{apply_slider, apply_wheel, DragSession, WheelDelta};
pub use state::{
    clamp_scale_percent, Point, TransformError, TransformState, MAX_SCALE_PERCENT,
    MIN_SCALE_PERCENT,
};

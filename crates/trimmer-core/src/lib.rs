//! Trimmer Core - pan, zoom and crop engine
//!
//! This crate provides the core functionality of the Trimmer image cropper:
//! loading an image, tracking its pan/zoom transform from pointer, wheel and
//! slider input, rendering the interactive preview, and compositing and
//! encoding the fixed-size crop.
//!
//! # Module Structure
//!
//! - `decode` - PNG/JPEG loading into an [`ImageAsset`]
//! - `transform` - [`TransformState`] and the input mappers
//! - `render` - render surfaces, preview and crop compositing
//! - `encode` - PNG export as a named [`CroppedAsset`]
//! - `session` - [`CropSession`], which ties the above to UI events
//! - `settings` - viewport geometry and colors

pub mod decode;
pub mod encode;
pub mod render;
pub mod session;
pub mod settings;
pub mod transform;

pub use decode::{base_name, DecodeError, ImageAsset};
pub use encode::{CroppedAsset, EncodeError};
pub use render::{crop, render_preview, InterpolationFilter, RenderSurface};
pub use session::{CropSession, SessionError};
pub use settings::{CropperSettings, SettingsError, Size, ViewportGeometry};
pub use transform::{DragSession, Point, TransformError, TransformState, WheelDelta};

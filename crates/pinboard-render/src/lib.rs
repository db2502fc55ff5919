//! Pinboard Render Library
//!
//! Full-scene redraw onto an abstract drawing [`Surface`], plus bitmap
//! decoding for image elements.

mod decode;
mod recording;
mod renderer;

pub use decode::{decode_bitmap, decode_image};
pub use recording::{DrawCommand, RecordingSurface};
pub use renderer::{RenderContext, RenderResult, RendererError, Surface, redraw};

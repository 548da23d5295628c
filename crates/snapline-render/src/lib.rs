//! Snapline Render Library
//!
//! Overlay geometry for smart guides, spacing, measurements and the grid, with a
//! tiny-skia renderer for hosts that composite a pixmap over their canvas.

mod overlay;
mod renderer;

pub use overlay::{OverlayPrimitive, OverlayStyle, build_overlay, format_distance};
pub use renderer::{PixmapRenderer, PlacedLabel, RenderContext, Renderer, RendererError};

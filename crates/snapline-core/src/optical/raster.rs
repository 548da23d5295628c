//! Rasterize element geometry with tiny-skia.

use super::OpticalError;
use crate::elements::ElementStyle;
use crate::geometry::is_degenerate;
use kurbo::{BezPath, PathEl, Rect};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Rendered content on a transparent background.
#[derive(Debug, Clone)]
pub struct Raster {
    pub pixmap: Pixmap,
    /// Document-space bounds the pixmap covers.
    pub bounds: Rect,
    /// Pixels per document unit.
    pub scale: f64,
}

impl Raster {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Size in pixels of the area `bounds` maps to. The pixmap rounds this up
    /// to whole pixels.
    pub fn content_size(&self) -> (f64, f64) {
        (self.bounds.width() * self.scale, self.bounds.height() * self.scale)
    }
}

/// Convert a kurbo path to a tiny-skia path. `None` for an empty path.
pub fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32),
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

fn skia_color(c: crate::elements::SerializableColor) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, c.a)
}

/// Render `path` into a pixmap whose longest side is `size` pixels.
///
/// `bounds` is the document area mapped onto the pixmap, normally the element's
/// stroked bounds. The fill is drawn with the style's fill colour, then the
/// stroke if it has a width; the background stays transparent.
pub fn rasterize(
    path: &BezPath,
    bounds: Rect,
    style: &ElementStyle,
    size: u32,
) -> Result<Raster, OpticalError> {
    if is_degenerate(bounds) {
        return Err(OpticalError::Raster("degenerate bounds".to_string()));
    }
    if size == 0 {
        return Err(OpticalError::Raster("raster size is zero".to_string()));
    }

    let scale = size as f64 / bounds.width().max(bounds.height());
    let width = ((bounds.width() * scale).ceil() as u32).clamp(1, size);
    let height = ((bounds.height() * scale).ceil() as u32).clamp(1, size);
    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| OpticalError::Raster(format!("cannot allocate {width}x{height} pixmap")))?;

    let skia_path =
        to_skia_path(path).ok_or_else(|| OpticalError::Raster("empty path".to_string()))?;
    let transform = Transform::from_translate(-bounds.x0 as f32, -bounds.y0 as f32)
        .post_scale(scale as f32, scale as f32);

    let mut paint = Paint::default();
    paint.anti_alias = true;

    if let Some(fill) = style.fill_color {
        paint.set_color(skia_color(fill));
        pixmap.fill_path(&skia_path, &paint, FillRule::Winding, transform, None);
    }
    if style.stroke_width > 0.0 {
        paint.set_color(skia_color(style.stroke_color));
        let stroke = Stroke {
            width: style.stroke_width as f32,
            ..Default::default()
        };
        pixmap.stroke_path(&skia_path, &paint, &stroke, transform, None);
    }

    Ok(Raster { pixmap, bounds, scale })
}

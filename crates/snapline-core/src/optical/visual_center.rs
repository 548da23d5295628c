//! Contrast-weighted center of mass of a raster.

use super::raster::Raster;
use crate::elements::SerializableColor;
use kurbo::Point;

/// Estimate where the eye places the center of `raster`, drawn over
/// `background`.
///
/// Each pixel weighs `alpha * |luminance - background luminance|`, so content
/// that barely stands out from the background pulls less. When no pixel has
/// any contrast the coverage alone is used. Returns a point normalised to
/// `0..1` over the raster's bounds (not the rounded-up pixmap), or `None` if
/// nothing was drawn.
pub fn visual_center(raster: &Raster, background: SerializableColor) -> Option<Point> {
    let width = raster.width() as usize;
    let (content_width, content_height) = raster.content_size();
    let background_luminance = background.luminance();

    let mut contrast = Accumulator::default();
    let mut coverage = Accumulator::default();

    for (i, pixel) in raster.pixmap.pixels().iter().enumerate() {
        let alpha = pixel.alpha() as f64 / 255.0;
        if alpha <= 0.0 {
            continue;
        }
        let color = pixel.demultiply();
        let luminance =
            SerializableColor::new(color.red(), color.green(), color.blue(), 255).luminance();
        let x = (i % width) as f64 + 0.5;
        let y = (i / width) as f64 + 0.5;

        contrast.add(x, y, alpha * (luminance - background_luminance).abs());
        coverage.add(x, y, alpha);
    }

    let (cx, cy) = contrast.center().or_else(|| coverage.center())?;
    Some(Point::new(cx / content_width, cy / content_height))
}

#[derive(Debug, Default)]
struct Accumulator {
    sum_x: f64,
    sum_y: f64,
    total: f64,
}

impl Accumulator {
    fn add(&mut self, x: f64, y: f64, weight: f64) {
        self.sum_x += x * weight;
        self.sum_y += y * weight;
        self.total += weight;
    }

    fn center(&self) -> Option<(f64, f64)> {
        (self.total > f64::EPSILON).then(|| (self.sum_x / self.total, self.sum_y / self.total))
    }
}

#[cfg(test)]
mod tests {
    use super::super::raster::rasterize;
    use super::*;
    use crate::elements::ElementStyle;
    use kurbo::{BezPath, Rect, Shape};

    fn triangle() -> BezPath {
        // Right-angled triangle, heavy at the bottom-left
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((0.0, 90.0));
        path.line_to((90.0, 90.0));
        path.close_path();
        path
    }

    #[test]
    fn test_square_is_centered() {
        let rect = Rect::new(0.0, 0.0, 40.0, 40.0);
        let style = ElementStyle::filled(SerializableColor::black());
        let raster = rasterize(&rect.to_path(0.1), rect, &style, 32).unwrap();
        let center = visual_center(&raster, SerializableColor::white()).unwrap();
        assert!((center.x - 0.5).abs() < 1e-6);
        assert!((center.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_triangle_pulls_toward_mass() {
        let path = triangle();
        let bounds = path.bounding_box();
        let style = ElementStyle::filled(SerializableColor::black());
        let raster = rasterize(&path, bounds, &style, 90).unwrap();
        let center = visual_center(&raster, SerializableColor::white()).unwrap();
        // Centroid of the triangle is at one third from the right angle
        assert!((center.x - 1.0 / 3.0).abs() < 0.03, "x = {}", center.x);
        assert!((center.y - 2.0 / 3.0).abs() < 0.03, "y = {}", center.y);
    }

    #[test]
    fn test_partial_pixel_row_does_not_bias() {
        // 10x7 at 8px: the content covers 5.6 rows of a 6 row pixmap
        let rect = Rect::new(0.0, 0.0, 10.0, 7.0);
        let style = ElementStyle::filled(SerializableColor::black());
        let raster = rasterize(&rect.to_path(0.1), rect, &style, 8).unwrap();
        assert_eq!(raster.height(), 6);
        let center = visual_center(&raster, SerializableColor::white()).unwrap();
        assert!((center.x - 0.5).abs() < 0.01, "x = {}", center.x);
        assert!((center.y - 0.5).abs() < 0.01, "y = {}", center.y);
    }

    #[test]
    fn test_same_luminance_falls_back_to_coverage() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let style = ElementStyle::filled(SerializableColor::white());
        let raster = rasterize(&rect.to_path(0.1), rect, &style, 8).unwrap();
        let center = visual_center(&raster, SerializableColor::white()).unwrap();
        assert!((center.x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_empty_raster_has_no_center() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let style = ElementStyle {
            stroke_width: 0.0,
            fill_color: None,
            ..ElementStyle::default()
        };
        let raster = rasterize(&rect.to_path(0.1), rect, &style, 8).unwrap();
        assert!(visual_center(&raster, SerializableColor::white()).is_none());
    }
}

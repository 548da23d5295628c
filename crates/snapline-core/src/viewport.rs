//! Viewport pan/zoom state and coordinate conversion.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// The visible window onto the document.
///
/// Converts between screen coordinates and document (canvas) coordinates.
/// Snap thresholds are given in screen pixels and divided by `zoom` so that
/// matching feels the same at every zoom level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Current translation offset (pan), in screen pixels.
    pub offset: Vec2,
    /// Current zoom level (1.0 = 100%).
    pub zoom: f64,
    /// Size of the viewport on screen. Zero when not yet laid out.
    pub size: Size,
    /// Minimum allowed zoom level
    pub min_zoom: f64,
    /// Maximum allowed zoom level
    pub max_zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            size: Size::ZERO,
            min_zoom: 0.02,
            max_zoom: 256.0,
        }
    }
}

impl Viewport {
    /// Create a viewport with a known screen size.
    pub fn with_size(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Document to screen transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Screen to document transform.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to document coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a document point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Convert a length in screen pixels to document units.
    pub fn screen_to_world_len(&self, pixels: f64) -> f64 {
        pixels / self.zoom
    }

    /// Visible document area, or `None` if the viewport has no size.
    pub fn visible_rect(&self) -> Option<Rect> {
        if self.size.width <= 0.0 || self.size.height <= 0.0 {
            return None;
        }
        let top_left = self.screen_to_world(Point::ZERO);
        let bottom_right = self.screen_to_world(Point::new(self.size.width, self.size.height));
        Some(Rect::from_points(top_left, bottom_right))
    }

    /// Center of the visible document area.
    pub fn center(&self) -> Option<Point> {
        self.visible_rect().map(|r| r.center())
    }

    /// Pan by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let world_point = self.screen_to_world(screen_point);
        self.zoom = new_zoom;

        let new_screen = self.world_to_screen(world_point);
        self.offset += screen_point - new_screen;
    }
}

//! Grid snapping, used when guidelines leave an axis free.

use kurbo::{Point, Rect, Vec2};

/// Most grid lines emitted per axis; coarser views skip the grid.
pub const MAX_GRID_LINES: usize = 500;

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The snapped point.
    pub point: Point,
    /// Whether the X coordinate was snapped.
    pub snapped_x: bool,
    /// Whether the Y coordinate was snapped.
    pub snapped_y: bool,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            snapped_x: false,
            snapped_y: false,
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }

    /// Offset from `from` to the snapped point.
    pub fn offset_from(&self, from: Point) -> Vec2 {
        self.point - from
    }
}

fn round_to(value: f64, grid_size: f64) -> f64 {
    (value / grid_size).round() * grid_size
}

/// Snap a point to the nearest grid intersection.
pub fn snap_to_grid(point: Point, grid_size: f64) -> SnapResult {
    if grid_size <= 0.0 || !grid_size.is_finite() {
        return SnapResult::none(point);
    }
    SnapResult {
        point: Point::new(round_to(point.x, grid_size), round_to(point.y, grid_size)),
        snapped_x: true,
        snapped_y: true,
    }
}

/// Snap the min corner of `bounds` to the grid on the axes that are still free.
///
/// Axes flagged as `locked_x`/`locked_y` (already snapped by a guideline) keep
/// their position.
pub fn snap_bounds_to_grid(bounds: Rect, grid_size: f64, locked_x: bool, locked_y: bool) -> SnapResult {
    let origin = bounds.origin();
    let snapped = snap_to_grid(origin, grid_size);
    if !snapped.is_snapped() {
        return snapped;
    }
    SnapResult {
        point: Point::new(
            if locked_x { origin.x } else { snapped.point.x },
            if locked_y { origin.y } else { snapped.point.y },
        ),
        snapped_x: !locked_x,
        snapped_y: !locked_y,
    }
}

/// Grid line coordinates inside `visible`: x positions of vertical lines and
/// y positions of horizontal lines.
///
/// Returns empty lists when the grid would be denser than [`MAX_GRID_LINES`].
pub fn grid_lines(visible: Rect, grid_size: f64) -> (Vec<f64>, Vec<f64>) {
    if grid_size <= 0.0
        || !grid_size.is_finite()
        || visible.width() / grid_size > MAX_GRID_LINES as f64
        || visible.height() / grid_size > MAX_GRID_LINES as f64
    {
        return (Vec::new(), Vec::new());
    }
    let lines = |min: f64, max: f64| {
        let first = (min / grid_size).ceil() as i64;
        let last = (max / grid_size).floor() as i64;
        (first..=last).map(|i| i as f64 * grid_size).collect::<Vec<_>>()
    };
    (lines(visible.x0, visible.x1), lines(visible.y0, visible.y1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_grid() {
        let result = snap_to_grid(Point::new(23.0, 47.0), 20.0);
        assert_eq!(result.point, Point::new(20.0, 40.0));
        assert!(result.snapped_x);
        assert!(result.snapped_y);
    }

    #[test]
    fn test_snap_to_grid_round_up() {
        let result = snap_to_grid(Point::new(31.0, -9.0), 20.0);
        assert_eq!(result.point, Point::new(40.0, -0.0));
    }

    #[test]
    fn test_invalid_grid_size() {
        assert!(!snap_to_grid(Point::new(3.0, 3.0), 0.0).is_snapped());
        assert!(!snap_to_grid(Point::new(3.0, 3.0), f64::NAN).is_snapped());
    }

    #[test]
    fn test_snap_bounds_skips_locked_axis() {
        let bounds = Rect::new(13.0, 27.0, 33.0, 47.0);
        let result = snap_bounds_to_grid(bounds, 8.0, true, false);
        assert_eq!(result.point, Point::new(13.0, 24.0));
        assert!(!result.snapped_x);
        assert!(result.snapped_y);
        assert_eq!(result.offset_from(bounds.origin()), Vec2::new(0.0, -3.0));
    }

    #[test]
    fn test_grid_lines() {
        let (xs, ys) = grid_lines(Rect::new(-5.0, 0.0, 20.0, 10.0), 8.0);
        assert_eq!(xs, vec![0.0, 8.0, 16.0]);
        assert_eq!(ys, vec![0.0, 8.0]);

        let (xs, _) = grid_lines(Rect::new(0.0, 0.0, 1e6, 10.0), 1.0);
        assert!(xs.is_empty());
    }
}

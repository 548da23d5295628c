//! Axis-aligned bounds helpers shared by the snapping engine.

use kurbo::{BezPath, PathEl, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// Tolerance below which a gap or extent is considered zero.
pub const EPSILON: f64 = 1e-6;

/// One of the two document axes.
///
/// `Horizontal` is the x axis: matches of kind left/right/center-x constrain it,
/// and horizontal distances are measured along it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The other axis.
    pub fn perpendicular(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Minimum coordinate of `bounds` along this axis.
    pub fn min(self, bounds: Rect) -> f64 {
        match self {
            Axis::Horizontal => bounds.x0,
            Axis::Vertical => bounds.y0,
        }
    }

    /// Maximum coordinate of `bounds` along this axis.
    pub fn max(self, bounds: Rect) -> f64 {
        match self {
            Axis::Horizontal => bounds.x1,
            Axis::Vertical => bounds.y1,
        }
    }

    /// Center coordinate of `bounds` along this axis.
    pub fn center(self, bounds: Rect) -> f64 {
        (self.min(bounds) + self.max(bounds)) / 2.0
    }

    /// Component of a vector along this axis.
    pub fn component(self, v: kurbo::Vec2) -> f64 {
        match self {
            Axis::Horizontal => v.x,
            Axis::Vertical => v.y,
        }
    }
}

/// Check whether bounds are unusable for matching (zero area or non-finite).
pub fn is_degenerate(bounds: Rect) -> bool {
    !bounds.is_finite() || bounds.width() <= EPSILON || bounds.height() <= EPSILON
}

/// Check whether two bounds overlap on `axis` (strictly, touching does not count).
pub fn overlaps_on(axis: Axis, a: Rect, b: Rect) -> bool {
    axis.min(a) < axis.max(b) && axis.min(b) < axis.max(a)
}

/// Check whether `outer` fully contains `inner`.
pub fn contains_rect(outer: Rect, inner: Rect) -> bool {
    inner.x0 >= outer.x0 && inner.y0 >= outer.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}

/// Positive gap between two bounds along `axis`, if they are separated on it.
///
/// Returns the gap together with the coordinates where it starts and ends.
pub fn gap_on(axis: Axis, a: Rect, b: Rect) -> Option<(f64, f64, f64)> {
    if axis.max(a) <= axis.min(b) {
        let gap = axis.min(b) - axis.max(a);
        (gap > EPSILON).then_some((gap, axis.max(a), axis.min(b)))
    } else if axis.max(b) <= axis.min(a) {
        let gap = axis.min(a) - axis.max(b);
        (gap > EPSILON).then_some((gap, axis.max(b), axis.min(a)))
    } else {
        None
    }
}

/// Split a path into its sub-paths (each starting at a `MoveTo`).
pub fn subpaths(path: &BezPath) -> Vec<BezPath> {
    let mut result = Vec::new();
    let mut current = BezPath::new();
    for el in path.elements() {
        if matches!(el, PathEl::MoveTo(_)) && !current.elements().is_empty() {
            result.push(std::mem::take(&mut current));
        }
        current.push(*el);
    }
    if !current.elements().is_empty() {
        result.push(current);
    }
    result
}

/// Union of the stroked extents of every sub-path.
///
/// Each sub-path's bounding box is inflated by half the stroke width. Returns
/// `Rect::ZERO` for an empty path.
pub fn stroked_bounds(path: &BezPath, stroke_width: f64) -> Rect {
    let half = (stroke_width / 2.0).max(0.0);
    subpaths(path)
        .iter()
        .map(|sub| sub.bounding_box().inflate(half, half))
        .reduce(|acc, b| acc.union(b))
        .unwrap_or(Rect::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn test_degenerate_bounds() {
        assert!(is_degenerate(Rect::new(0.0, 0.0, 0.0, 10.0)));
        assert!(is_degenerate(Rect::new(0.0, 0.0, f64::NAN, 10.0)));
        assert!(is_degenerate(Rect::new(0.0, 0.0, f64::INFINITY, 10.0)));
        assert!(!is_degenerate(Rect::new(0.0, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn test_gap_on_axis() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 0.0, 30.0, 10.0);
        assert_eq!(gap_on(Axis::Horizontal, a, b), Some((10.0, 10.0, 20.0)));
        assert_eq!(gap_on(Axis::Horizontal, b, a), Some((10.0, 10.0, 20.0)));
        assert_eq!(gap_on(Axis::Vertical, a, b), None);

        // Touching is not a gap
        let c = Rect::new(10.0, 0.0, 15.0, 10.0);
        assert_eq!(gap_on(Axis::Horizontal, a, c), None);
    }

    #[test]
    fn test_stroked_bounds_unions_subpaths() {
        let mut path = BezPath::new();
        path.move_to(Point::new(0.0, 0.0));
        path.line_to(Point::new(10.0, 0.0));
        path.line_to(Point::new(10.0, 10.0));
        path.close_path();
        path.move_to(Point::new(50.0, 50.0));
        path.line_to(Point::new(60.0, 70.0));

        assert_eq!(subpaths(&path).len(), 2);
        let bounds = stroked_bounds(&path, 2.0);
        assert_eq!(bounds, Rect::new(-1.0, -1.0, 61.0, 71.0));
    }

    #[test]
    fn test_empty_path_bounds() {
        assert_eq!(stroked_bounds(&BezPath::new(), 4.0), Rect::ZERO);
    }

    #[test]
    fn test_overlap_excludes_touching() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(overlaps_on(Axis::Vertical, a, Rect::new(20.0, 5.0, 30.0, 15.0)));
        assert!(!overlaps_on(Axis::Vertical, a, Rect::new(20.0, 10.0, 30.0, 15.0)));
    }
}

//! Edge-to-edge measurement between the selection and a hovered element.

use crate::geometry::{Axis, EPSILON, contains_rect, gap_on, overlaps_on};
use crate::guidelines::GapSpan;
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// How a measured segment relates the two bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasureKind {
    /// Empty space between separated bounds.
    Gap,
    /// Distance from an inner edge to the matching outer edge.
    Inset,
}

/// A single measured distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasureSegment {
    pub kind: MeasureKind,
    /// Axis the distance runs along.
    pub axis: Axis,
    pub span: GapSpan,
    /// Coordinate on the other axis where the segment is drawn.
    pub cross: f64,
}

impl MeasureSegment {
    pub fn length(&self) -> f64 {
        self.span.length()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub selected: Rect,
    pub hovered: Rect,
    pub segments: Vec<MeasureSegment>,
}

/// Measure from `selected` to `hovered`.
///
/// Separated bounds give the horizontal and vertical gaps; nested bounds give
/// the four insets of the inner one. Zero-length distances are left out and
/// `None` is returned when nothing remains.
pub fn measure(selected: Rect, hovered: Rect) -> Option<Measurement> {
    let mut segments = Vec::new();

    let nested = if contains_rect(hovered, selected) {
        Some((hovered, selected))
    } else if contains_rect(selected, hovered) {
        Some((selected, hovered))
    } else {
        None
    };

    if let Some((outer, inner)) = nested {
        let center = inner.center();
        let insets = [
            (Axis::Horizontal, outer.x0, inner.x0, center.y),
            (Axis::Horizontal, inner.x1, outer.x1, center.y),
            (Axis::Vertical, outer.y0, inner.y0, center.x),
            (Axis::Vertical, inner.y1, outer.y1, center.x),
        ];
        for (axis, start, end, cross) in insets {
            if end - start > EPSILON {
                segments.push(MeasureSegment {
                    kind: MeasureKind::Inset,
                    axis,
                    span: GapSpan::new(start, end),
                    cross,
                });
            }
        }
    } else {
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let Some((_, start, end)) = gap_on(axis, selected, hovered) else {
                continue;
            };
            let cross_axis = axis.perpendicular();
            // Middle of the shared band when the bounds overlap across, else the selection's center
            let cross = if overlaps_on(cross_axis, selected, hovered) {
                let lo = cross_axis.min(selected).max(cross_axis.min(hovered));
                let hi = cross_axis.max(selected).min(cross_axis.max(hovered));
                (lo + hi) / 2.0
            } else {
                cross_axis.center(selected)
            };
            segments.push(MeasureSegment {
                kind: MeasureKind::Gap,
                axis,
                span: GapSpan::new(start, end),
                cross,
            });
        }
    }

    (!segments.is_empty()).then_some(Measurement {
        selected,
        hovered,
        segments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_in_a_row() {
        let m = measure(Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(25.0, 4.0, 35.0, 20.0)).unwrap();
        assert_eq!(m.segments.len(), 1);
        let s = m.segments[0];
        assert_eq!(s.kind, MeasureKind::Gap);
        assert_eq!(s.axis, Axis::Horizontal);
        assert_eq!(s.length(), 15.0);
        assert_eq!(s.cross, 7.0);
    }

    #[test]
    fn test_diagonal_gives_both_gaps() {
        let m = measure(Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(30.0, 50.0, 40.0, 60.0)).unwrap();
        let lengths: Vec<_> = m.segments.iter().map(|s| (s.axis, s.length())).collect();
        assert_eq!(lengths, vec![(Axis::Horizontal, 20.0), (Axis::Vertical, 40.0)]);
    }

    #[test]
    fn test_insets_skip_zero() {
        let m = measure(Rect::new(10.0, 0.0, 30.0, 20.0), Rect::new(0.0, 0.0, 100.0, 50.0)).unwrap();
        assert!(m.segments.iter().all(|s| s.kind == MeasureKind::Inset));
        // Top inset is zero and omitted
        assert_eq!(m.segments.len(), 3);
        let lengths: Vec<_> = m.segments.iter().map(MeasureSegment::length).collect();
        assert_eq!(lengths, vec![10.0, 70.0, 30.0]);
    }

    #[test]
    fn test_touching_or_identical_gives_none() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(measure(a, Rect::new(10.0, 0.0, 20.0, 10.0)).is_none());
        assert!(measure(a, a).is_none());
    }
}

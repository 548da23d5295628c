//! Match types produced by the guideline engine.

use crate::elements::ElementId;
use crate::geometry::Axis;
use crate::guides::GuideId;
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// Which edge or center of the moved element a match aligns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlignmentKind {
    Left,
    Right,
    Top,
    Bottom,
    CenterX,
    CenterY,
}

impl AlignmentKind {
    /// Kinds constraining the x coordinate.
    pub const HORIZONTAL: [AlignmentKind; 3] =
        [AlignmentKind::Left, AlignmentKind::Right, AlignmentKind::CenterX];
    /// Kinds constraining the y coordinate.
    pub const VERTICAL: [AlignmentKind; 3] =
        [AlignmentKind::Top, AlignmentKind::Bottom, AlignmentKind::CenterY];

    /// The axis this kind constrains.
    pub fn axis(self) -> Axis {
        match self {
            AlignmentKind::Left | AlignmentKind::Right | AlignmentKind::CenterX => Axis::Horizontal,
            AlignmentKind::Top | AlignmentKind::Bottom | AlignmentKind::CenterY => Axis::Vertical,
        }
    }

    /// Coordinate of this edge or center on `bounds`.
    pub fn coordinate(self, bounds: Rect) -> f64 {
        match self {
            AlignmentKind::Left => bounds.x0,
            AlignmentKind::Right => bounds.x1,
            AlignmentKind::Top => bounds.y0,
            AlignmentKind::Bottom => bounds.y1,
            AlignmentKind::CenterX => (bounds.x0 + bounds.x1) / 2.0,
            AlignmentKind::CenterY => (bounds.y0 + bounds.y1) / 2.0,
        }
    }

    pub fn is_center(self) -> bool {
        matches!(self, AlignmentKind::CenterX | AlignmentKind::CenterY)
    }

    /// All kinds constraining `axis`.
    pub fn for_axis(axis: Axis) -> [AlignmentKind; 3] {
        match axis {
            Axis::Horizontal => Self::HORIZONTAL,
            Axis::Vertical => Self::VERTICAL,
        }
    }
}

/// What produced a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchSource {
    /// One or more other elements share the matched coordinate.
    Elements(Vec<ElementId>),
    /// A manual guide line.
    Guide(GuideId),
    /// The center of the visible viewport.
    ViewportCenter,
}

/// Match priority tiers. Lower numbers win.
pub const PRIORITY_CENTER: u8 = 1;
pub const PRIORITY_EDGE: u8 = 2;

/// An alignment between the moved element and a target coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidelineMatch {
    pub kind: AlignmentKind,
    /// Matched coordinate in document space.
    pub position: f64,
    pub source: MatchSource,
    pub priority: u8,
}

impl GuidelineMatch {
    /// Ids of the elements that produced this match (empty for guides and the viewport).
    pub fn element_ids(&self) -> &[ElementId] {
        match &self.source {
            MatchSource::Elements(ids) => ids,
            _ => &[],
        }
    }

    /// Whether a manual guide produced this match.
    pub fn is_manual(&self) -> bool {
        matches!(self.source, MatchSource::Guide(_))
    }

    /// Offset along the match axis that snaps `bounds` onto the matched coordinate.
    pub fn snap_offset(&self, bounds: Rect) -> f64 {
        self.position - self.kind.coordinate(bounds)
    }
}

/// At most one match per axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignmentMatches {
    /// Match constraining x (left, right or center-x).
    pub horizontal: Option<GuidelineMatch>,
    /// Match constraining y (top, bottom or center-y).
    pub vertical: Option<GuidelineMatch>,
}

impl AlignmentMatches {
    pub fn get(&self, axis: Axis) -> Option<&GuidelineMatch> {
        match axis {
            Axis::Horizontal => self.horizontal.as_ref(),
            Axis::Vertical => self.vertical.as_ref(),
        }
    }

    pub fn set(&mut self, axis: Axis, m: Option<GuidelineMatch>) {
        match axis {
            Axis::Horizontal => self.horizontal = m,
            Axis::Vertical => self.vertical = m,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.horizontal.is_none() && self.vertical.is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GuidelineMatch> {
        self.horizontal.iter().chain(self.vertical.iter())
    }

    pub fn clear(&mut self) {
        self.horizontal = None;
        self.vertical = None;
    }
}

/// A span along one axis between two coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapSpan {
    pub start: f64,
    pub end: f64,
}

impl GapSpan {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}

/// A gap the moved element reproduces relative to a reference gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceGuidelineMatch {
    /// Axis the gaps are measured along.
    pub axis: Axis,
    /// The reference distance.
    pub distance: f64,
    /// The reference gap.
    pub reference: GapSpan,
    /// Elements on either side of the reference gap.
    pub reference_ids: (ElementId, ElementId),
    /// The gap between the moved element and its neighbor.
    pub current: GapSpan,
    /// The element the moved element is measured against.
    pub neighbor_id: ElementId,
    pub moved_id: ElementId,
}

/// Another element's bounds considered as a snap target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapCandidate {
    pub id: ElementId,
    pub bounds: Rect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_axis_partition() {
        for kind in AlignmentKind::HORIZONTAL {
            assert_eq!(kind.axis(), Axis::Horizontal);
        }
        for kind in AlignmentKind::VERTICAL {
            assert_eq!(kind.axis(), Axis::Vertical);
        }
    }

    #[test]
    fn test_snap_offset() {
        let m = GuidelineMatch {
            kind: AlignmentKind::CenterX,
            position: 50.0,
            source: MatchSource::ViewportCenter,
            priority: PRIORITY_CENTER,
        };
        assert_eq!(m.snap_offset(Rect::new(0.0, 0.0, 96.0, 10.0)), 2.0);
        assert!(m.element_ids().is_empty());
    }
}

//! Resize handles on a selected element's bounds.

use crate::geometry::Axis;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Handle size in screen pixels.
pub const HANDLE_SIZE: f64 = 8.0;
/// Handle hit tolerance in screen pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 12.0;
/// Smallest width or height a resize produces.
pub const MIN_RESIZE_SIZE: f64 = 1.0;

/// Which end of an axis a handle drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleEdge {
    /// Left or top.
    Min,
    /// Right or bottom.
    Max,
}

/// A resize handle: four edge midpoints and four corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeHandle {
    Top,
    Right,
    Bottom,
    Left,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::TopLeft,
        ResizeHandle::Top,
        ResizeHandle::TopRight,
        ResizeHandle::Right,
        ResizeHandle::BottomRight,
        ResizeHandle::Bottom,
        ResizeHandle::BottomLeft,
        ResizeHandle::Left,
    ];

    /// Parse a handle identifier.
    ///
    /// Accepts the short forms (`tl`, `br`, `l`, ...), compass forms (`nw`, `se`,
    /// `w`, ...) and any name containing `left`/`right`/`top`/`bottom`, such as
    /// `resize-top-left`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        let handle = match name.as_str() {
            "tl" | "nw" => ResizeHandle::TopLeft,
            "tr" | "ne" => ResizeHandle::TopRight,
            "bl" | "sw" => ResizeHandle::BottomLeft,
            "br" | "se" => ResizeHandle::BottomRight,
            "t" | "n" => ResizeHandle::Top,
            "r" | "e" => ResizeHandle::Right,
            "b" | "s" => ResizeHandle::Bottom,
            "l" | "w" => ResizeHandle::Left,
            _ => {
                let x = match (name.contains("left"), name.contains("right")) {
                    (true, false) => Some(HandleEdge::Min),
                    (false, true) => Some(HandleEdge::Max),
                    (false, false) => None,
                    (true, true) => return None,
                };
                let y = match (name.contains("top"), name.contains("bottom")) {
                    (true, false) => Some(HandleEdge::Min),
                    (false, true) => Some(HandleEdge::Max),
                    (false, false) => None,
                    (true, true) => return None,
                };
                return Self::from_edges(x, y);
            }
        };
        Some(handle)
    }

    /// The handle dragging the given ends of the x and y axes.
    pub fn from_edges(x: Option<HandleEdge>, y: Option<HandleEdge>) -> Option<Self> {
        use HandleEdge::{Max, Min};
        let handle = match (x, y) {
            (Some(Min), None) => ResizeHandle::Left,
            (Some(Max), None) => ResizeHandle::Right,
            (None, Some(Min)) => ResizeHandle::Top,
            (None, Some(Max)) => ResizeHandle::Bottom,
            (Some(Min), Some(Min)) => ResizeHandle::TopLeft,
            (Some(Max), Some(Min)) => ResizeHandle::TopRight,
            (Some(Min), Some(Max)) => ResizeHandle::BottomLeft,
            (Some(Max), Some(Max)) => ResizeHandle::BottomRight,
            (None, None) => return None,
        };
        Some(handle)
    }

    /// Short identifier, the inverse of [`ResizeHandle::from_name`].
    pub fn name(self) -> &'static str {
        match self {
            ResizeHandle::Top => "t",
            ResizeHandle::Right => "r",
            ResizeHandle::Bottom => "b",
            ResizeHandle::Left => "l",
            ResizeHandle::TopLeft => "tl",
            ResizeHandle::TopRight => "tr",
            ResizeHandle::BottomLeft => "bl",
            ResizeHandle::BottomRight => "br",
        }
    }

    /// The end of `axis` this handle drags, if any.
    pub fn edge(self, axis: Axis) -> Option<HandleEdge> {
        use ResizeHandle::*;
        match axis {
            Axis::Horizontal => match self {
                Left | TopLeft | BottomLeft => Some(HandleEdge::Min),
                Right | TopRight | BottomRight => Some(HandleEdge::Max),
                Top | Bottom => None,
            },
            Axis::Vertical => match self {
                Top | TopLeft | TopRight => Some(HandleEdge::Min),
                Bottom | BottomLeft | BottomRight => Some(HandleEdge::Max),
                Left | Right => None,
            },
        }
    }

    pub fn is_corner(self) -> bool {
        self.edge(Axis::Horizontal).is_some() && self.edge(Axis::Vertical).is_some()
    }

    /// Position of the handle on `bounds`.
    pub fn position(self, bounds: Rect) -> Point {
        let x = match self.edge(Axis::Horizontal) {
            Some(HandleEdge::Min) => bounds.x0,
            Some(HandleEdge::Max) => bounds.x1,
            None => bounds.center().x,
        };
        let y = match self.edge(Axis::Vertical) {
            Some(HandleEdge::Min) => bounds.y0,
            Some(HandleEdge::Max) => bounds.y1,
            None => bounds.center().y,
        };
        Point::new(x, y)
    }
}

/// A handle with its position.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    /// Position in world coordinates.
    pub position: Point,
    pub kind: ResizeHandle,
}

impl Handle {
    pub fn new(position: Point, kind: ResizeHandle) -> Self {
        Self { position, kind }
    }

    /// Check if a point (in world coordinates) hits this handle.
    /// `tolerance` should be adjusted for viewport zoom.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }
}

/// All resize handles of `bounds`.
pub fn get_handles(bounds: Rect) -> Vec<Handle> {
    ResizeHandle::ALL
        .iter()
        .map(|&kind| Handle::new(kind.position(bounds), kind))
        .collect()
}

/// Find which handle (if any) is hit at the given point. On small bounds
/// several handles can be in reach; the closest one wins.
pub fn hit_test_handles(bounds: Rect, point: Point, tolerance: f64) -> Option<ResizeHandle> {
    get_handles(bounds)
        .into_iter()
        .filter(|h| h.hit_test(point, tolerance))
        .min_by(|a, b| {
            a.position
                .distance_squared(point)
                .total_cmp(&b.position.distance_squared(point))
        })
        .map(|h| h.kind)
}

/// Drag the edges `handle` controls by `delta`.
///
/// Edges not controlled by the handle stay where they are. A dragged edge stops
/// [`MIN_RESIZE_SIZE`] short of the opposite one, so bounds never invert.
pub fn apply_resize(original: Rect, handle: ResizeHandle, delta: Vec2) -> Rect {
    let mut out = original;
    match handle.edge(Axis::Horizontal) {
        Some(HandleEdge::Min) => out.x0 = (original.x0 + delta.x).min(original.x1 - MIN_RESIZE_SIZE),
        Some(HandleEdge::Max) => out.x1 = (original.x1 + delta.x).max(original.x0 + MIN_RESIZE_SIZE),
        None => {}
    }
    match handle.edge(Axis::Vertical) {
        Some(HandleEdge::Min) => out.y0 = (original.y0 + delta.y).min(original.y1 - MIN_RESIZE_SIZE),
        Some(HandleEdge::Max) => out.y1 = (original.y1 + delta.y).max(original.y0 + MIN_RESIZE_SIZE),
        None => {}
    }
    out
}

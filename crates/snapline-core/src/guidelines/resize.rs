//! Snapping for resize gestures.

use super::SnapContext;
use crate::elements::ElementId;
use crate::geometry::{Axis, is_degenerate};
use crate::selection::{HandleEdge, MIN_RESIZE_SIZE, ResizeHandle};
use kurbo::Rect;

/// Snapped bounds of a resize step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeSnap {
    pub bounds: Rect,
    /// Target x coordinate, if the x axis snapped.
    pub snapped_x: Option<f64>,
    /// Target y coordinate, if the y axis snapped.
    pub snapped_y: Option<f64>,
}

impl ResizeSnap {
    fn unsnapped(bounds: Rect) -> Self {
        Self {
            bounds,
            snapped_x: None,
            snapped_y: None,
        }
    }

    pub fn is_snapped(&self) -> bool {
        self.snapped_x.is_some() || self.snapped_y.is_some()
    }
}

/// Target coordinates along `axis`, in test order: manual guides, element
/// edges, element centers.
fn axis_targets(ctx: &SnapContext<'_>, element_id: ElementId, axis: Axis) -> Vec<f64> {
    let settings = ctx.settings;
    let mut targets = Vec::new();

    if settings.snap_to_manual_guides {
        targets.extend(
            ctx.guides
                .iter()
                .filter(|g| g.applies_to(ctx.frame_id) && g.orientation.constrained_axis() == axis)
                .map(|g| g.position),
        );
    }
    if settings.snap_to_edges {
        for c in ctx.targets(element_id) {
            targets.push(axis.min(c.bounds));
            targets.push(axis.max(c.bounds));
        }
    }
    if settings.snap_to_centers {
        targets.extend(ctx.targets(element_id).map(|c| axis.center(c.bounds)));
    }
    targets
}

fn set_edge(bounds: &mut Rect, axis: Axis, edge: HandleEdge, value: f64) {
    match (axis, edge) {
        (Axis::Horizontal, HandleEdge::Min) => bounds.x0 = value,
        (Axis::Horizontal, HandleEdge::Max) => bounds.x1 = value,
        (Axis::Vertical, HandleEdge::Min) => bounds.y0 = value,
        (Axis::Vertical, HandleEdge::Max) => bounds.y1 = value,
    }
}

/// Snap the edges a resize handle controls.
///
/// Each axis the handle drags is tested against guides, then element edges,
/// then element centers; the first target within threshold wins. Edges the
/// handle does not control are never changed. For corner handles an axis whose
/// edge did not snap may still snap by center: the dragged edge moves so the
/// bounds' center lands on the target. A snap that would leave less than
/// [`MIN_RESIZE_SIZE`] against the `original` fixed edge is skipped.
pub fn snap_resize_bounds(
    ctx: &SnapContext<'_>,
    element_id: ElementId,
    proposed: Rect,
    original: Rect,
    handle: ResizeHandle,
) -> ResizeSnap {
    if !ctx.settings.enabled || is_degenerate(proposed) {
        return ResizeSnap::unsnapped(proposed);
    }

    let threshold = ctx.threshold();
    let mut out = ResizeSnap::unsnapped(proposed);

    for axis in [Axis::Horizontal, Axis::Vertical] {
        let Some(edge) = handle.edge(axis) else {
            continue;
        };
        let targets = axis_targets(ctx, element_id, axis);

        // Keeps the dragged edge on its own side of the fixed one
        let valid = |value: f64| match edge {
            HandleEdge::Min => value <= axis.max(original) - MIN_RESIZE_SIZE,
            HandleEdge::Max => value >= axis.min(original) + MIN_RESIZE_SIZE,
        };
        let (dragged, fixed) = match edge {
            HandleEdge::Min => (axis.min(proposed), axis.max(proposed)),
            HandleEdge::Max => (axis.max(proposed), axis.min(proposed)),
        };

        let mut snapped = targets
            .iter()
            .copied()
            .find(|&t| (dragged - t).abs() <= threshold && valid(t))
            .map(|t| (t, t));

        if snapped.is_none() && handle.is_corner() {
            let center = axis.center(proposed);
            snapped = targets
                .iter()
                .copied()
                .filter(|&t| (center - t).abs() <= threshold)
                .map(|t| (t, 2.0 * t - fixed))
                .find(|&(_, edge_value)| valid(edge_value));
        }

        if let Some((target, edge_value)) = snapped {
            set_edge(&mut out.bounds, axis, edge, edge_value);
            match axis {
                Axis::Horizontal => out.snapped_x = Some(target),
                Axis::Vertical => out.snapped_y = Some(target),
            }
        }
    }

    if out.is_snapped() {
        log::trace!(
            "Resize {} snapped x={:?} y={:?}",
            handle.name(),
            out.snapped_x,
            out.snapped_y
        );
    }
    out
}

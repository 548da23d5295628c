//! Alignment-match finder.

use super::SnapContext;
use super::types::{
    AlignmentKind, AlignmentMatches, GuidelineMatch, MatchSource, PRIORITY_CENTER, PRIORITY_EDGE,
};
use crate::elements::ElementId;
use crate::geometry::{Axis, is_degenerate};
use kurbo::Rect;
use std::collections::HashSet;

/// A candidate before per-axis selection.
#[derive(Debug, Clone)]
struct Proposal {
    kind: AlignmentKind,
    position: f64,
    priority: u8,
    /// Distance between the moved element's edge and `position`.
    distance: f64,
    source: MatchSource,
}

/// Edge of another element that touches the moved element's `kind` edge.
fn touching(kind: AlignmentKind) -> AlignmentKind {
    match kind {
        AlignmentKind::Left => AlignmentKind::Right,
        AlignmentKind::Right => AlignmentKind::Left,
        AlignmentKind::Top => AlignmentKind::Bottom,
        AlignmentKind::Bottom => AlignmentKind::Top,
        other => other,
    }
}

/// Add an element-sourced proposal, merging it into an existing one of the same
/// kind and tier whose position lies within `threshold`. A merged proposal keeps
/// the first position and only gains the element id.
fn push_element(
    proposals: &mut Vec<Proposal>,
    candidate: Proposal,
    element_id: ElementId,
    threshold: f64,
) {
    let existing = proposals.iter_mut().find(|p| {
        p.kind == candidate.kind
            && p.priority == candidate.priority
            && matches!(p.source, MatchSource::Elements(_))
            && (p.position - candidate.position).abs() <= threshold
    });

    match existing {
        Some(p) => {
            if let MatchSource::Elements(ids) = &mut p.source {
                if !ids.contains(&element_id) {
                    ids.push(element_id);
                }
            }
        }
        None => proposals.push(candidate),
    }
}

/// Find at most one horizontal and one vertical alignment for the moved element.
///
/// `projected` is where the moved element would be after the pending drag delta.
/// Manual guides, element centers and the viewport center form the first priority
/// tier; element edges (same-side and touching) form the second. Within an axis
/// the lowest tier wins, then the smallest distance, then the earliest candidate.
///
/// A center match from an element whose edge already matched on the same axis is
/// dropped: the edge match carries the same information and is what the user
/// lined up.
pub fn find_alignment_matches(
    ctx: &SnapContext<'_>,
    moved_id: ElementId,
    projected: Rect,
) -> AlignmentMatches {
    let mut matches = AlignmentMatches::default();
    if !ctx.settings.enabled || is_degenerate(projected) {
        return matches;
    }

    let threshold = ctx.threshold();
    let mut proposals: Vec<Proposal> = Vec::new();

    if ctx.settings.snap_to_manual_guides {
        for guide in ctx.guides.iter().filter(|g| g.applies_to(ctx.frame_id)) {
            let axis = guide.orientation.constrained_axis();
            for kind in AlignmentKind::for_axis(axis) {
                let distance = (kind.coordinate(projected) - guide.position).abs();
                if distance <= threshold {
                    proposals.push(Proposal {
                        kind,
                        position: guide.position,
                        priority: PRIORITY_CENTER,
                        distance,
                        source: MatchSource::Guide(guide.id()),
                    });
                }
            }
        }
    }

    if ctx.settings.snap_to_viewport_center {
        if let Some(center) = ctx.viewport.center() {
            for (kind, position) in [
                (AlignmentKind::CenterX, center.x),
                (AlignmentKind::CenterY, center.y),
            ] {
                let distance = (kind.coordinate(projected) - position).abs();
                if distance <= threshold {
                    proposals.push(Proposal {
                        kind,
                        position,
                        priority: PRIORITY_CENTER,
                        distance,
                        source: MatchSource::ViewportCenter,
                    });
                }
            }
        }
    }

    let mut edge_matched: HashSet<(ElementId, Axis)> = HashSet::new();

    if ctx.settings.snap_to_edges {
        let edges = [
            AlignmentKind::Left,
            AlignmentKind::Right,
            AlignmentKind::Top,
            AlignmentKind::Bottom,
        ];
        for target in ctx.targets(moved_id) {
            for kind in edges {
                let moved = kind.coordinate(projected);
                let same_side = kind.coordinate(target.bounds);
                let touching_side = touching(kind).coordinate(target.bounds);
                // The same-side edge wins over the touching one on narrow targets
                let Some((position, distance)) = [same_side, touching_side]
                    .into_iter()
                    .map(|position| (position, (moved - position).abs()))
                    .find(|&(_, distance)| distance <= threshold)
                else {
                    continue;
                };
                edge_matched.insert((target.id, kind.axis()));
                push_element(
                    &mut proposals,
                    Proposal {
                        kind,
                        position,
                        priority: PRIORITY_EDGE,
                        distance,
                        source: MatchSource::Elements(vec![target.id]),
                    },
                    target.id,
                    threshold,
                );
            }
        }
    }

    if ctx.settings.snap_to_centers {
        for target in ctx.targets(moved_id) {
            for kind in [AlignmentKind::CenterX, AlignmentKind::CenterY] {
                if edge_matched.contains(&(target.id, kind.axis())) {
                    continue;
                }
                let position = kind.coordinate(target.bounds);
                let distance = (kind.coordinate(projected) - position).abs();
                if distance <= threshold {
                    push_element(
                        &mut proposals,
                        Proposal {
                            kind,
                            position,
                            priority: PRIORITY_CENTER,
                            distance,
                            source: MatchSource::Elements(vec![target.id]),
                        },
                        target.id,
                        threshold,
                    );
                }
            }
        }
    }

    for axis in [Axis::Horizontal, Axis::Vertical] {
        let best = proposals
            .iter()
            .filter(|p| p.kind.axis() == axis)
            .min_by(|a, b| {
                a.priority
                    .cmp(&b.priority)
                    .then(a.distance.total_cmp(&b.distance))
            })
            .map(|p| GuidelineMatch {
                kind: p.kind,
                position: p.position,
                source: p.source.clone(),
                priority: p.priority,
            });
        matches.set(axis, best);
    }

    matches
}

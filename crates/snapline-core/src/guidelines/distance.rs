//! Distance-pattern finder (equal spacing guides).

use super::SnapContext;
use super::types::{AlignmentMatches, DistanceGuidelineMatch, GapSpan, SnapCandidate};
use crate::elements::ElementId;
use crate::geometry::{Axis, EPSILON, gap_on, is_degenerate, overlaps_on};
use kurbo::Rect;
use std::collections::BTreeMap;

/// A positive gap between two consecutive banded elements.
#[derive(Debug, Clone, Copy)]
struct ReferenceGap {
    from: ElementId,
    to: ElementId,
    span: GapSpan,
}

/// A positive gap between the moved element and its nearest banded neighbor.
#[derive(Debug, Clone, Copy)]
struct CurrentGap {
    neighbor: ElementId,
    span: GapSpan,
}

fn push_unique(out: &mut Vec<DistanceGuidelineMatch>, m: DistanceGuidelineMatch) {
    let duplicate = out.iter().any(|o| {
        o.axis == m.axis
            && o.reference_ids == m.reference_ids
            && o.neighbor_id == m.neighbor_id
            && (o.current.start - m.current.start).abs() < EPSILON
    });
    if !duplicate {
        out.push(m);
    }
}

/// Find the gap distances the moved element reproduces.
///
/// When an alignment match came from exactly one other element, the direct gap
/// to that element along the perpendicular axis is reported. Otherwise, along
/// each axis, only elements in the moved element's band (overlapping it on the
/// perpendicular axis) are considered: their consecutive gaps are grouped by
/// rounded distance, and every group whose distance the moved element reproduces
/// against its nearest neighbor (within threshold) yields one match per
/// reference pair. Zero, negative and touching gaps never produce a match.
pub fn find_distance_matches(
    ctx: &SnapContext<'_>,
    moved_id: ElementId,
    projected: Rect,
    alignment: &AlignmentMatches,
) -> Vec<DistanceGuidelineMatch> {
    let mut out = Vec::new();
    if !ctx.settings.enabled || !ctx.settings.show_distances || is_degenerate(projected) {
        return out;
    }

    // Direct gap to a single aligned reference
    for m in alignment.iter() {
        let [reference_id] = m.element_ids() else {
            continue;
        };
        let Some(reference) = ctx.targets(moved_id).find(|c| c.id == *reference_id) else {
            continue;
        };
        let axis = m.kind.axis().perpendicular();
        if let Some((gap, start, end)) = gap_on(axis, reference.bounds, projected) {
            let span = GapSpan::new(start, end);
            push_unique(
                &mut out,
                DistanceGuidelineMatch {
                    axis,
                    distance: gap,
                    reference: span,
                    reference_ids: (reference.id, moved_id),
                    current: span,
                    neighbor_id: reference.id,
                    moved_id,
                },
            );
        }
    }

    for axis in [Axis::Horizontal, Axis::Vertical] {
        band_matches(ctx, moved_id, projected, axis, &mut out);
    }

    out
}

fn band_matches(
    ctx: &SnapContext<'_>,
    moved_id: ElementId,
    projected: Rect,
    axis: Axis,
    out: &mut Vec<DistanceGuidelineMatch>,
) {
    let threshold = ctx.threshold();
    let cross = axis.perpendicular();

    let mut banded: Vec<&SnapCandidate> = ctx
        .targets(moved_id)
        .filter(|c| overlaps_on(cross, c.bounds, projected))
        .collect();
    if banded.is_empty() {
        return;
    }
    banded.sort_by(|a, b| axis.min(a.bounds).total_cmp(&axis.min(b.bounds)));

    // Reference gaps between consecutive banded elements, grouped by rounded distance
    let mut groups: BTreeMap<i64, Vec<ReferenceGap>> = BTreeMap::new();
    for pair in banded.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if axis.max(a.bounds) > axis.min(b.bounds) {
            continue;
        }
        let Some((gap, start, end)) = gap_on(axis, a.bounds, b.bounds) else {
            continue;
        };
        // The moved element sitting inside this gap splits it
        if start < axis.max(projected) && axis.min(projected) < end {
            continue;
        }
        groups.entry(gap.round() as i64).or_default().push(ReferenceGap {
            from: a.id,
            to: b.id,
            span: GapSpan::new(start, end),
        });
    }

    // Nearest neighbors strictly before and after the moved element. Elements
    // overlapping it on this axis (a background panel, a card) are skipped.
    let before = banded
        .iter()
        .filter(|c| axis.max(c.bounds) <= axis.min(projected))
        .max_by(|a, b| axis.max(a.bounds).total_cmp(&axis.max(b.bounds)))
        .and_then(|c| {
            let start = axis.max(c.bounds);
            let end = axis.min(projected);
            (end - start > EPSILON).then_some(CurrentGap {
                neighbor: c.id,
                span: GapSpan::new(start, end),
            })
        });
    let after = banded
        .iter()
        .filter(|c| axis.min(c.bounds) >= axis.max(projected))
        .min_by(|a, b| axis.min(a.bounds).total_cmp(&axis.min(b.bounds)))
        .and_then(|c| {
            let start = axis.max(projected);
            let end = axis.min(c.bounds);
            (end - start > EPSILON).then_some(CurrentGap {
                neighbor: c.id,
                span: GapSpan::new(start, end),
            })
        });

    for current in before.iter().chain(after.iter()) {
        for gaps in groups.values() {
            let distance = gaps[0].span.length();
            if (current.span.length() - distance).abs() > threshold {
                continue;
            }
            for reference in gaps {
                push_unique(
                    out,
                    DistanceGuidelineMatch {
                        axis,
                        distance: reference.span.length(),
                        reference: reference.span,
                        reference_ids: (reference.from, reference.to),
                        current: current.span,
                        neighbor_id: current.neighbor,
                        moved_id,
                    },
                );
            }
        }
    }

    // Centered between two neighbors
    if let (Some(b), Some(a)) = (before, after) {
        if (b.span.length() - a.span.length()).abs() <= threshold {
            push_unique(
                out,
                DistanceGuidelineMatch {
                    axis,
                    distance: b.span.length(),
                    reference: b.span,
                    reference_ids: (b.neighbor, moved_id),
                    current: a.span,
                    neighbor_id: a.neighbor,
                    moved_id,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::alignment::find_alignment_matches;
    use super::super::fixture::Fixture;
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_reproduced_row_gap() {
        let mut fx = Fixture::new();
        let a = fx.add(0.0, 0.0, 10.0, 10.0);
        let b = fx.add(20.0, 0.0, 30.0, 10.0);
        let moved = Uuid::new_v4();
        let projected = Rect::new(40.0, 0.0, 50.0, 10.0);

        let alignment = find_alignment_matches(&fx.ctx(), moved, projected);
        let distances = find_distance_matches(&fx.ctx(), moved, projected, &alignment);

        assert_eq!(distances.len(), 1);
        let d = &distances[0];
        assert_eq!(d.axis, Axis::Horizontal);
        assert_eq!(d.distance, 10.0);
        assert_eq!(d.reference_ids, (a, b));
        assert_eq!(d.reference, GapSpan::new(10.0, 20.0));
        assert_eq!(d.current, GapSpan::new(30.0, 40.0));
        assert_eq!(d.neighbor_id, b);
        assert_eq!(d.moved_id, moved);
    }

    #[test]
    fn test_gap_within_threshold() {
        let mut fx = Fixture::new();
        fx.add(0.0, 0.0, 10.0, 10.0);
        fx.add(20.0, 0.0, 30.0, 10.0);

        let near = Rect::new(43.0, 2.0, 53.0, 12.0);
        let distances =
            find_distance_matches(&fx.ctx(), Uuid::new_v4(), near, &AlignmentMatches::default());
        assert_eq!(distances.len(), 1);
        assert_eq!(distances[0].current.length(), 13.0);

        let far = Rect::new(47.0, 2.0, 57.0, 12.0);
        assert!(
            find_distance_matches(&fx.ctx(), Uuid::new_v4(), far, &AlignmentMatches::default())
                .is_empty()
        );
    }

    #[test]
    fn test_single_reference_direct_gap() {
        let mut fx = Fixture::new();
        let a = fx.add(0.0, 0.0, 10.0, 10.0);
        let moved = Uuid::new_v4();
        let projected = Rect::new(25.0, 0.0, 35.0, 10.0);

        let alignment = find_alignment_matches(&fx.ctx(), moved, projected);
        assert_eq!(alignment.vertical.as_ref().unwrap().element_ids(), &[a]);

        let distances = find_distance_matches(&fx.ctx(), moved, projected, &alignment);
        assert_eq!(distances.len(), 1);
        assert_eq!(distances[0].distance, 15.0);
        assert_eq!(distances[0].reference_ids, (a, moved));
        assert_eq!(distances[0].current, GapSpan::new(10.0, 25.0));
    }

    #[test]
    fn test_no_match_for_touching_or_overlapping() {
        let mut fx = Fixture::new();
        fx.add(0.0, 0.0, 10.0, 10.0);
        fx.add(20.0, 0.0, 30.0, 10.0);
        let none = AlignmentMatches::default();

        let touching = Rect::new(30.0, 0.0, 40.0, 10.0);
        assert!(find_distance_matches(&fx.ctx(), Uuid::new_v4(), touching, &none).is_empty());

        // Overlaps the second element; the gap to the first is off by more than the threshold
        let overlapping = Rect::new(28.0, 0.0, 38.0, 10.0);
        assert!(find_distance_matches(&fx.ctx(), Uuid::new_v4(), overlapping, &none).is_empty());
    }

    #[test]
    fn test_background_element_in_row() {
        let mut fx = Fixture::new();
        fx.add(-100.0, -100.0, 200.0, 200.0);
        let a = fx.add(0.0, 0.0, 10.0, 10.0);
        let b = fx.add(20.0, 0.0, 30.0, 10.0);
        let moved = Uuid::new_v4();
        let projected = Rect::new(40.0, 0.0, 50.0, 10.0);

        let distances =
            find_distance_matches(&fx.ctx(), moved, projected, &AlignmentMatches::default());
        let row = distances
            .iter()
            .find(|d| d.axis == Axis::Horizontal && d.reference_ids == (a, b))
            .unwrap();
        assert_eq!(row.distance, 10.0);
        assert_eq!(row.neighbor_id, b);
        assert_eq!(row.current, GapSpan::new(30.0, 40.0));
    }

    #[test]
    fn test_unbanded_elements_ignored() {
        let mut fx = Fixture::new();
        fx.add(0.0, 0.0, 10.0, 10.0);
        fx.add(20.0, 0.0, 30.0, 10.0);

        let other_row = Rect::new(40.0, 100.0, 50.0, 110.0);
        let distances =
            find_distance_matches(&fx.ctx(), Uuid::new_v4(), other_row, &AlignmentMatches::default());
        assert!(distances.is_empty());
    }

    #[test]
    fn test_vertical_column() {
        let mut fx = Fixture::new();
        fx.add(0.0, 0.0, 10.0, 10.0);
        fx.add(0.0, 30.0, 10.0, 40.0);

        let below = Rect::new(2.0, 60.0, 12.0, 70.0);
        let distances =
            find_distance_matches(&fx.ctx(), Uuid::new_v4(), below, &AlignmentMatches::default());
        assert_eq!(distances.len(), 1);
        assert_eq!(distances[0].axis, Axis::Vertical);
        assert_eq!(distances[0].distance, 20.0);
    }

    #[test]
    fn test_centered_between_neighbors() {
        let mut fx = Fixture::new();
        let left = fx.add(0.0, 0.0, 10.0, 10.0);
        let right = fx.add(40.0, 0.0, 50.0, 10.0);
        let moved = Uuid::new_v4();

        let distances = find_distance_matches(
            &fx.ctx(),
            moved,
            Rect::new(21.0, 0.0, 31.0, 10.0),
            &AlignmentMatches::default(),
        );
        assert_eq!(distances.len(), 1);
        assert_eq!(distances[0].reference_ids, (left, moved));
        assert_eq!(distances[0].neighbor_id, right);
        assert_eq!(distances[0].reference, GapSpan::new(10.0, 21.0));
        assert_eq!(distances[0].current, GapSpan::new(31.0, 40.0));
    }

    #[test]
    fn test_disabled() {
        let mut fx = Fixture::new();
        fx.add(0.0, 0.0, 10.0, 10.0);
        fx.add(20.0, 0.0, 30.0, 10.0);
        fx.settings.show_distances = false;
        let projected = Rect::new(40.0, 0.0, 50.0, 10.0);
        assert!(
            find_distance_matches(&fx.ctx(), Uuid::new_v4(), projected, &AlignmentMatches::default())
                .is_empty()
        );
    }
}

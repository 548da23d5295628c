//! Sticky snapping: hold a snapped position until the pointer pushes through.

use super::types::AlignmentMatches;
use crate::geometry::Axis;
use kurbo::{Rect, Vec2};

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;
#[cfg(target_arch = "wasm32")]
use web_time::Instant;

/// Result of applying snapping to a drag delta.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StickyOutcome {
    /// Delta to apply to the element.
    pub delta: Vec2,
    /// Whether any axis is snapped.
    pub snapped: bool,
    /// Matches the delta was snapped to.
    pub matches: AlignmentMatches,
}

impl StickyOutcome {
    /// Snap straight to the given matches, without hysteresis.
    pub fn direct(raw_delta: Vec2, projected: Rect, matches: &AlignmentMatches) -> Self {
        let mut delta = raw_delta;
        if let Some(m) = &matches.horizontal {
            delta.x += m.snap_offset(projected);
        }
        if let Some(m) = &matches.vertical {
            delta.y += m.snap_offset(projected);
        }
        Self {
            delta,
            snapped: !matches.is_empty(),
            matches: matches.clone(),
        }
    }
}

/// Hysteresis state for one drag gesture.
///
/// Goes `Free -> Sticky` when an axis snaps and back to `Free` once every axis
/// released. While an axis is held, the difference between the pointer's
/// movement and the applied movement accumulates in `sticky_offset`; when it
/// exceeds `break_factor * threshold` the axis lets go and follows the raw
/// delta again.
#[derive(Debug, Clone, Default)]
pub struct StickyState {
    /// Whether at least one axis is snapped.
    pub is_sticky: bool,
    /// Accumulated pointer movement not applied while snapped, per axis.
    pub sticky_offset: Vec2,
    /// When the state last became sticky.
    pub since: Option<Instant>,
    /// Targets currently held, per axis.
    held: AlignmentMatches,
    last_raw: Vec2,
    last_applied: Vec2,
}

impl StickyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Targets currently held.
    pub fn held(&self) -> &AlignmentMatches {
        &self.held
    }

    /// Return to the free state with nothing accumulated.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn offset_mut(&mut self, axis: Axis) -> &mut f64 {
        match axis {
            Axis::Horizontal => &mut self.sticky_offset.x,
            Axis::Vertical => &mut self.sticky_offset.y,
        }
    }

    /// Adjust a raw drag delta.
    ///
    /// `projected` is the element's bounds moved by `raw_delta` and `fresh` the
    /// alignment matches found for it this frame.
    pub fn apply(
        &mut self,
        raw_delta: Vec2,
        projected: Rect,
        fresh: &AlignmentMatches,
        threshold: f64,
        break_factor: f64,
    ) -> StickyOutcome {
        let was_sticky = self.is_sticky;
        let limit = break_factor * threshold;
        let mut applied = raw_delta;

        for axis in [Axis::Horizontal, Axis::Vertical] {
            let raw = axis.component(raw_delta);
            let intended_step = raw - axis.component(self.last_raw);
            let mut held = self.held.get(axis).cloned();

            if let Some(target) = &held {
                let pinned = raw + target.snap_offset(projected);
                let applied_step = pinned - axis.component(self.last_applied);
                let accumulated = *self.offset_mut(axis) + intended_step - applied_step;
                if accumulated.abs() > limit {
                    log::debug!(
                        "Sticky snap released on {:?} at {:.2} (accumulated {:.2})",
                        axis,
                        target.position,
                        accumulated
                    );
                    held = None;
                    *self.offset_mut(axis) = 0.0;
                } else {
                    *self.offset_mut(axis) = accumulated;
                }
            }

            if held.is_none() {
                if let Some(m) = fresh.get(axis) {
                    held = Some(m.clone());
                    *self.offset_mut(axis) = 0.0;
                }
            }

            let value = match &held {
                Some(target) => raw + target.snap_offset(projected),
                None => raw,
            };
            match axis {
                Axis::Horizontal => applied.x = value,
                Axis::Vertical => applied.y = value,
            }
            self.held.set(axis, held);
        }

        self.is_sticky = !self.held.is_empty();
        if self.is_sticky && !was_sticky {
            log::debug!("Sticky snap engaged");
            self.since = Some(Instant::now());
        } else if !self.is_sticky && was_sticky {
            log::debug!("Sticky snap free");
            self.since = None;
            self.sticky_offset = Vec2::ZERO;
        }

        self.last_raw = raw_delta;
        self.last_applied = applied;

        StickyOutcome {
            delta: applied,
            snapped: self.is_sticky,
            matches: self.held.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::alignment::find_alignment_matches;
    use super::super::fixture::Fixture;
    use super::super::types::{AlignmentKind, GuidelineMatch, MatchSource, PRIORITY_EDGE};
    use super::*;
    use uuid::Uuid;

    const THRESHOLD: f64 = 5.0;
    const ORIGINAL: Rect = Rect::new(0.0, 0.0, 10.0, 10.0);

    fn left_at(position: f64) -> AlignmentMatches {
        AlignmentMatches {
            horizontal: Some(GuidelineMatch {
                kind: AlignmentKind::Left,
                position,
                source: MatchSource::Elements(vec![Uuid::new_v4()]),
                priority: PRIORITY_EDGE,
            }),
            vertical: None,
        }
    }

    fn step(state: &mut StickyState, fx: &Fixture, moved: Uuid, x: f64) -> StickyOutcome {
        let raw = Vec2::new(x, 0.0);
        let projected = ORIGINAL + raw;
        let fresh = find_alignment_matches(&fx.ctx(), moved, projected);
        state.apply(raw, projected, &fresh, THRESHOLD, 2.0)
    }

    #[test]
    fn test_pinned_until_break_out() {
        let mut fx = Fixture::new();
        fx.add(100.0, 200.0, 150.0, 250.0);
        let moved = Uuid::new_v4();
        let mut state = StickyState::new();

        let out = step(&mut state, &fx, moved, 97.0);
        assert!(out.snapped);
        assert_eq!(out.delta.x, 100.0);
        assert_eq!(state.sticky_offset.x, 0.0);
        assert!(state.since.is_some());

        // Pushing further stays pinned, also past the match threshold
        for x in [99.0, 102.0, 104.0, 106.0] {
            let out = step(&mut state, &fx, moved, x);
            assert!(out.snapped, "released early at {x}");
            assert_eq!(out.delta.x, 100.0);
        }
        assert_eq!(state.sticky_offset.x, 9.0);

        // 11 units past the snap point exceeds 2 x threshold
        let out = step(&mut state, &fx, moved, 108.0);
        assert!(!out.snapped);
        assert_eq!(out.delta.x, 108.0);
        assert!(!state.is_sticky);
        assert_eq!(state.sticky_offset, Vec2::ZERO);
        assert!(state.since.is_none());
    }

    #[test]
    fn test_back_and_forth_accumulates_net_movement() {
        let mut state = StickyState::new();
        let fresh = left_at(50.0);

        let raw = Vec2::new(48.0, 0.0);
        let out = state.apply(raw, ORIGINAL + raw, &fresh, THRESHOLD, 2.0);
        assert_eq!(out.delta.x, 50.0);

        for x in [56.0, 44.0, 54.0] {
            let raw = Vec2::new(x, 0.0);
            let out = state.apply(raw, ORIGINAL + raw, &AlignmentMatches::default(), THRESHOLD, 2.0);
            assert_eq!(out.delta.x, 50.0);
        }
        assert_eq!(state.sticky_offset.x, 6.0);

        // Pulling back the other way releases past -10
        let raw = Vec2::new(37.0, 0.0);
        let out = state.apply(raw, ORIGINAL + raw, &AlignmentMatches::default(), THRESHOLD, 2.0);
        assert!(!out.snapped);
        assert_eq!(out.delta.x, 37.0);
    }

    #[test]
    fn test_axes_release_independently() {
        let mut state = StickyState::new();
        let mut fresh = left_at(50.0);
        fresh.vertical = Some(GuidelineMatch {
            kind: AlignmentKind::Top,
            position: 20.0,
            source: MatchSource::ViewportCenter,
            priority: PRIORITY_EDGE,
        });

        let raw = Vec2::new(49.0, 19.0);
        let out = state.apply(raw, ORIGINAL + raw, &fresh, THRESHOLD, 2.0);
        assert_eq!(out.delta, Vec2::new(50.0, 20.0));

        // Push x through, keep y close
        let raw = Vec2::new(61.0, 21.0);
        let out = state.apply(raw, ORIGINAL + raw, &AlignmentMatches::default(), THRESHOLD, 2.0);
        assert_eq!(out.delta, Vec2::new(61.0, 20.0));
        assert!(out.snapped);
        assert!(out.matches.horizontal.is_none());
        assert!(out.matches.vertical.is_some());
        assert!(state.is_sticky);
    }

    #[test]
    fn test_reset() {
        let mut state = StickyState::new();
        let raw = Vec2::new(48.0, 0.0);
        state.apply(raw, ORIGINAL + raw, &left_at(50.0), THRESHOLD, 2.0);
        assert!(state.is_sticky);

        state.reset();
        assert!(!state.is_sticky);
        assert!(state.held().is_empty());
        assert_eq!(state.sticky_offset, Vec2::ZERO);
    }

    #[test]
    fn test_direct_snap() {
        let raw = Vec2::new(48.0, 3.0);
        let out = StickyOutcome::direct(raw, ORIGINAL + raw, &left_at(50.0));
        assert_eq!(out.delta, Vec2::new(50.0, 3.0));
        assert!(out.snapped);
    }
}

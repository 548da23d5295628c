//! One drag gesture: snapping on every pointer move, commit, end and cancel.

use super::SnapContext;
use super::alignment::find_alignment_matches;
use super::cache::CandidateCache;
use super::distance::find_distance_matches;
use super::resize::{ResizeSnap, snap_resize_bounds};
use super::sticky::{StickyOutcome, StickyState};
use super::types::{AlignmentMatches, DistanceGuidelineMatch};
use crate::elements::{ElementId, FrameId};
use crate::grid::snap_bounds_to_grid;
use crate::selection::{ResizeHandle, apply_resize};
use crate::state::{AppState, StateError};
use kurbo::{Rect, Vec2};

/// What a gesture does to its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Move,
    Resize(ResizeHandle),
}

/// Snapped result of one pointer move.
#[derive(Debug, Clone, PartialEq)]
pub struct DragUpdate {
    /// Offset of the snapped bounds' origin from the original bounds' origin.
    pub delta: Vec2,
    /// Where the element should be.
    pub bounds: Rect,
    /// Alignments the bounds are snapped to.
    pub matches: AlignmentMatches,
    pub distances: Vec<DistanceGuidelineMatch>,
    /// Resize snapping, for resize gestures.
    pub resize: Option<ResizeSnap>,
    /// Whether guidelines or the grid snapped the bounds.
    pub snapped: bool,
}

/// State of an active drag on a single element.
///
/// Created on pointer down, fed every pointer move, and consumed by
/// [`DragSession::end`] (pointer up) or [`DragSession::cancel`] (Escape).
/// Nothing it holds outlives the gesture.
#[derive(Debug, Clone)]
pub struct DragSession {
    element_id: ElementId,
    kind: DragKind,
    frame_id: Option<FrameId>,
    /// Bounds at pointer down.
    original: Rect,
    cache: CandidateCache,
    sticky: StickyState,
    last: Option<DragUpdate>,
}

impl DragSession {
    /// Start a gesture on `element_id`.
    pub fn begin(state: &AppState, element_id: ElementId, kind: DragKind) -> Result<Self, StateError> {
        let element = state
            .element(element_id)
            .ok_or(StateError::ElementNotFound(element_id))?;
        if element.locked {
            return Err(StateError::ElementLocked(element_id));
        }
        log::debug!("Drag {:?} started on {}", kind, element_id);
        Ok(Self {
            element_id,
            kind,
            frame_id: element.frame_id,
            original: element.bounds(),
            cache: CandidateCache::build(state, element_id),
            sticky: StickyState::new(),
            last: None,
        })
    }

    pub fn element_id(&self) -> ElementId {
        self.element_id
    }

    pub fn kind(&self) -> DragKind {
        self.kind
    }

    pub fn original(&self) -> Rect {
        self.original
    }

    /// The most recent update, if the pointer moved since `begin`.
    pub fn last_update(&self) -> Option<&DragUpdate> {
        self.last.as_ref()
    }

    pub fn sticky(&self) -> &StickyState {
        &self.sticky
    }

    /// Route a pointer delta to [`DragSession::update`] or
    /// [`DragSession::update_resize`] depending on the gesture kind.
    pub fn update_pointer(&mut self, state: &AppState, pointer_delta: Vec2) -> DragUpdate {
        match self.kind {
            DragKind::Move => self.update(state, pointer_delta),
            DragKind::Resize(handle) => {
                let proposed = apply_resize(self.original, handle, pointer_delta);
                self.update_resize(state, proposed)
            }
        }
    }

    /// Snap a move by `raw_delta` from the original position.
    ///
    /// Runs the alignment finder on the projected bounds, applies sticky
    /// snapping (or plain snapping when sticky is off), falls back to the grid
    /// on axes no guideline claimed, and measures distances on the result.
    pub fn update(&mut self, state: &AppState, raw_delta: Vec2) -> DragUpdate {
        self.cache.refresh(state);
        let settings = &state.settings.guidelines;
        let ctx = SnapContext {
            candidates: self.cache.candidates(),
            guides: state.guides(),
            viewport: &state.viewport,
            settings,
            frame_id: self.frame_id,
        };

        let projected = self.original + raw_delta;
        let fresh = find_alignment_matches(&ctx, self.element_id, projected);
        let outcome = if settings.sticky {
            self.sticky.apply(
                raw_delta,
                projected,
                &fresh,
                ctx.threshold(),
                settings.sticky_break_factor,
            )
        } else {
            StickyOutcome::direct(raw_delta, projected, &fresh)
        };

        let mut delta = outcome.delta;
        let mut grid_snapped = false;
        let grid = &state.settings.grid;
        if grid.snap {
            let bounds = self.original + delta;
            let snapped = snap_bounds_to_grid(
                bounds,
                grid.size,
                outcome.matches.horizontal.is_some(),
                outcome.matches.vertical.is_some(),
            );
            delta += snapped.offset_from(bounds.origin());
            grid_snapped = snapped.is_snapped();
        }

        let bounds = self.original + delta;
        let distances = find_distance_matches(&ctx, self.element_id, bounds, &outcome.matches);
        let update = DragUpdate {
            delta,
            bounds,
            matches: outcome.matches,
            distances,
            resize: None,
            snapped: outcome.snapped || grid_snapped,
        };
        self.last = Some(update.clone());
        update
    }

    /// Snap proposed bounds of a resize gesture.
    ///
    /// Move gestures get `proposed` back unchanged.
    pub fn update_resize(&mut self, state: &AppState, proposed: Rect) -> DragUpdate {
        self.cache.refresh(state);
        let resize = match self.kind {
            DragKind::Resize(handle) => {
                let ctx = SnapContext {
                    candidates: self.cache.candidates(),
                    guides: state.guides(),
                    viewport: &state.viewport,
                    settings: &state.settings.guidelines,
                    frame_id: self.frame_id,
                };
                Some(snap_resize_bounds(&ctx, self.element_id, proposed, self.original, handle))
            }
            DragKind::Move => None,
        };
        let bounds = resize.map_or(proposed, |r| r.bounds);
        let update = DragUpdate {
            delta: bounds.origin() - self.original.origin(),
            bounds,
            matches: AlignmentMatches::default(),
            distances: Vec::new(),
            resize,
            snapped: resize.is_some_and(|r| r.is_snapped()),
        };
        self.last = Some(update.clone());
        update
    }

    /// Write an update's bounds to the element.
    pub fn commit(&mut self, state: &mut AppState, update: &DragUpdate) -> Result<Rect, StateError> {
        let cache_fresh = !self.cache.is_stale(state);
        let after = match self.kind {
            DragKind::Move => {
                let current = state
                    .bounds_of(self.element_id)
                    .ok_or(StateError::ElementNotFound(self.element_id))?;
                state.translate_element(self.element_id, update.bounds.origin() - current.origin())?
            }
            DragKind::Resize(_) => state.resize_element(self.element_id, update.bounds)?,
        };
        if cache_fresh {
            self.cache.acknowledge(state);
        }
        Ok(after)
    }

    /// Finish the gesture (pointer up). Returns the last update.
    pub fn end(self) -> Option<DragUpdate> {
        log::debug!("Drag on {} ended", self.element_id);
        self.last
    }

    /// Abort the gesture (Escape) and put the element back where it started.
    ///
    /// Returns the translation that restored the original position.
    pub fn cancel(self, state: &mut AppState) -> Result<Vec2, StateError> {
        let current = state
            .bounds_of(self.element_id)
            .ok_or(StateError::ElementNotFound(self.element_id))?;
        let restore = self.original.origin() - current.origin();
        if current != self.original {
            match self.kind {
                DragKind::Move => state.translate_element(self.element_id, restore)?,
                DragKind::Resize(_) => state.resize_element(self.element_id, self.original)?,
            };
        }
        log::debug!("Drag on {} cancelled", self.element_id);
        Ok(restore)
    }
}

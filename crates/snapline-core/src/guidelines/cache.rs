//! Per-gesture cache of candidate bounds.

use super::types::SnapCandidate;
use crate::elements::ElementId;
use crate::geometry::is_degenerate;
use crate::state::AppState;

/// Bounds of every visible element except the moved one, captured at a given
/// store revision.
///
/// Candidates are read on every pointer move; the cache avoids re-walking the
/// store until something else changes it.
#[derive(Debug, Clone)]
pub struct CandidateCache {
    exclude: ElementId,
    revision: u64,
    candidates: Vec<SnapCandidate>,
}

impl CandidateCache {
    /// Snapshot the candidates for a gesture on `exclude`.
    pub fn build(state: &AppState, exclude: ElementId) -> Self {
        let candidates: Vec<SnapCandidate> = state
            .elements()
            .ordered()
            .filter(|el| el.id() != exclude && el.visible)
            .map(|el| SnapCandidate {
                id: el.id(),
                bounds: el.bounds(),
            })
            .filter(|c| !is_degenerate(c.bounds))
            .collect();
        log::trace!("Candidate cache built with {} elements", candidates.len());
        Self {
            exclude,
            revision: state.revision(),
            candidates,
        }
    }

    pub fn candidates(&self) -> &[SnapCandidate] {
        &self.candidates
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether the store changed since the snapshot.
    pub fn is_stale(&self, state: &AppState) -> bool {
        self.revision != state.revision()
    }

    /// Rebuild if stale. Returns whether a rebuild happened.
    pub fn refresh(&mut self, state: &AppState) -> bool {
        if !self.is_stale(state) {
            return false;
        }
        *self = Self::build(state, self.exclude);
        true
    }

    /// Accept the store's current revision without rebuilding.
    ///
    /// Only valid after writes that touched nothing but the excluded element,
    /// such as committing the gesture's own position.
    pub fn acknowledge(&mut self, state: &AppState) {
        self.revision = state.revision();
    }
}

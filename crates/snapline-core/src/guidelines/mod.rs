//! Smart guidelines: alignment, equal spacing, sticky snapping and resize snapping.
//!
//! All functions here are pure with respect to the application state: they read
//! candidate bounds, manual guides and the viewport through a [`SnapContext`] and
//! return matches. Positions are only ever written back through
//! [`AppState::update_element`](crate::state::AppState::update_element), which the
//! [`DragSession`] does on commit.

mod alignment;
mod cache;
mod distance;
mod resize;
mod session;
mod sticky;
mod types;

pub use alignment::find_alignment_matches;
pub use cache::CandidateCache;
pub use distance::find_distance_matches;
pub use resize::{ResizeSnap, snap_resize_bounds};
pub use session::{DragKind, DragSession, DragUpdate};
pub use sticky::{StickyOutcome, StickyState};
pub use types::{
    AlignmentKind, AlignmentMatches, DistanceGuidelineMatch, GapSpan, GuidelineMatch,
    MatchSource, PRIORITY_CENTER, PRIORITY_EDGE, SnapCandidate,
};

use crate::elements::{ElementId, FrameId};
use crate::geometry::is_degenerate;
use crate::guides::GuideSet;
use crate::settings::GuidelineSettings;
use crate::viewport::Viewport;

/// Everything the matchers read for one pointer move.
#[derive(Debug, Clone, Copy)]
pub struct SnapContext<'a> {
    /// Bounds of the other elements.
    pub candidates: &'a [SnapCandidate],
    pub guides: &'a GuideSet,
    pub viewport: &'a Viewport,
    pub settings: &'a GuidelineSettings,
    /// Frame of the moved element. Frame-owned guides only apply inside their frame.
    pub frame_id: Option<FrameId>,
}

impl<'a> SnapContext<'a> {
    /// Snap threshold in document units.
    pub fn threshold(&self) -> f64 {
        self.viewport.screen_to_world_len(self.settings.threshold_px)
    }

    /// Usable candidates, excluding the moved element and degenerate bounds.
    pub fn targets(&self, moved_id: ElementId) -> impl Iterator<Item = &'a SnapCandidate> {
        self.candidates
            .iter()
            .filter(move |c| c.id != moved_id && !is_degenerate(c.bounds))
    }
}

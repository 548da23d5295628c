//! Manual guides dragged out of the rulers.

use crate::elements::FrameId;
use crate::geometry::Axis;
use crate::state::StateError;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for manual guides.
pub type GuideId = Uuid;

/// Direction of a guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuideOrientation {
    /// A horizontal line at a fixed y coordinate (dragged from the top ruler).
    Horizontal,
    /// A vertical line at a fixed x coordinate (dragged from the left ruler).
    Vertical,
}

impl GuideOrientation {
    /// The axis whose coordinate this guide fixes.
    pub fn constrained_axis(self) -> Axis {
        match self {
            GuideOrientation::Horizontal => Axis::Vertical,
            GuideOrientation::Vertical => Axis::Horizontal,
        }
    }
}

/// A user-placed guide line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualGuide {
    pub(crate) id: GuideId,
    pub orientation: GuideOrientation,
    /// Fixed coordinate in document space.
    pub position: f64,
    /// Locked guides cannot be moved but still act as snap targets.
    #[serde(default)]
    pub locked: bool,
    /// Frame owning this guide. Guides without a frame apply everywhere.
    #[serde(default)]
    pub frame_id: Option<FrameId>,
}

impl ManualGuide {
    pub fn new(orientation: GuideOrientation, position: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            orientation,
            position,
            locked: false,
            frame_id: None,
        }
    }

    pub fn id(&self) -> GuideId {
        self.id
    }

    /// Whether this guide applies to an element in `frame`.
    pub fn applies_to(&self, frame: Option<FrameId>) -> bool {
        self.frame_id.is_none() || self.frame_id == frame
    }

    /// Distance from a document point to the guide line.
    pub fn distance_to(&self, point: Point) -> f64 {
        match self.orientation {
            GuideOrientation::Horizontal => (point.y - self.position).abs(),
            GuideOrientation::Vertical => (point.x - self.position).abs(),
        }
    }
}

/// All manual guides of a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuideSet {
    guides: Vec<ManualGuide>,
}

impl GuideSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a guide created by dragging out of a ruler.
    pub fn add(
        &mut self,
        orientation: GuideOrientation,
        position: f64,
        frame_id: Option<FrameId>,
    ) -> GuideId {
        let mut guide = ManualGuide::new(orientation, position);
        guide.frame_id = frame_id;
        let id = guide.id;
        self.guides.push(guide);
        id
    }

    /// Remove a guide. Returns the removed guide.
    pub fn remove(&mut self, id: GuideId) -> Option<ManualGuide> {
        let index = self.guides.iter().position(|g| g.id == id)?;
        Some(self.guides.remove(index))
    }

    /// Move a guide to a new position.
    pub fn move_guide(&mut self, id: GuideId, position: f64) -> Result<(), StateError> {
        let guide = self
            .guides
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(StateError::GuideNotFound(id))?;
        if guide.locked {
            return Err(StateError::GuideLocked(id));
        }
        guide.position = position;
        Ok(())
    }

    /// Lock or unlock a guide.
    pub fn set_locked(&mut self, id: GuideId, locked: bool) -> Result<(), StateError> {
        let guide = self
            .guides
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(StateError::GuideNotFound(id))?;
        guide.locked = locked;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.guides.clear();
    }

    pub fn get(&self, id: GuideId) -> Option<&ManualGuide> {
        self.guides.iter().find(|g| g.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ManualGuide> {
        self.guides.iter()
    }

    /// Guides with the given orientation.
    pub fn with_orientation(
        &self,
        orientation: GuideOrientation,
    ) -> impl Iterator<Item = &ManualGuide> {
        self.guides.iter().filter(move |g| g.orientation == orientation)
    }

    pub fn len(&self) -> usize {
        self.guides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guides.is_empty()
    }

    /// Closest guide to a document point within `tolerance`.
    pub fn find_near(&self, point: Point, tolerance: f64) -> Option<GuideId> {
        self.guides
            .iter()
            .map(|g| (g.id, g.distance_to(point)))
            .filter(|(_, d)| *d <= tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_move_remove() {
        let mut guides = GuideSet::new();
        let id = guides.add(GuideOrientation::Vertical, 100.0, None);
        assert_eq!(guides.len(), 1);

        guides.move_guide(id, 120.0).unwrap();
        assert_eq!(guides.get(id).unwrap().position, 120.0);

        let removed = guides.remove(id).unwrap();
        assert_eq!(removed.position, 120.0);
        assert!(guides.is_empty());
        assert!(guides.remove(id).is_none());
    }

    #[test]
    fn test_locked_guide_cannot_move() {
        let mut guides = GuideSet::new();
        let id = guides.add(GuideOrientation::Horizontal, 50.0, None);
        guides.set_locked(id, true).unwrap();

        let err = guides.move_guide(id, 60.0).unwrap_err();
        assert!(matches!(err, StateError::GuideLocked(_)));
        assert_eq!(guides.get(id).unwrap().position, 50.0);
    }

    #[test]
    fn test_find_near_picks_closest() {
        let mut guides = GuideSet::new();
        let far = guides.add(GuideOrientation::Vertical, 100.0, None);
        let near = guides.add(GuideOrientation::Horizontal, 52.0, None);

        assert_eq!(guides.find_near(Point::new(97.0, 51.0), 5.0), Some(near));
        assert_eq!(guides.find_near(Point::new(98.0, 200.0), 5.0), Some(far));
        assert_eq!(guides.find_near(Point::new(0.0, 0.0), 5.0), None);
    }

    #[test]
    fn test_frame_scoping() {
        let frame = Uuid::new_v4();
        let mut guide = ManualGuide::new(GuideOrientation::Vertical, 0.0);
        assert!(guide.applies_to(None));
        assert!(guide.applies_to(Some(frame)));

        guide.frame_id = Some(frame);
        assert!(guide.applies_to(Some(frame)));
        assert!(!guide.applies_to(None));
    }
}

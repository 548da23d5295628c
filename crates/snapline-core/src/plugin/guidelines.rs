//! Smart guides while dragging and resizing, and manual guide dragging.

use super::{Plugin, PluginSlice, PluginState, Shortcut};
use crate::elements::ElementId;
use crate::grid::snap_to_grid;
use crate::guidelines::{
    AlignmentMatches, DistanceGuidelineMatch, DragKind, DragSession, DragUpdate, ResizeSnap,
};
use crate::guides::{GuideId, GuideOrientation};
use crate::input::{EventResponse, KeyPress, MouseButton, PointerEvent};
use crate::selection::{HANDLE_HIT_TOLERANCE, hit_test_handles};
use crate::state::AppState;
use kurbo::Point;

const TOGGLE_GUIDES: Shortcut = Shortcut::new(";", true, false, "Toggle smart guides");
const TOGGLE_DISTANCES: Shortcut = Shortcut::new(";", true, true, "Toggle distance guides");
const CLEAR_GUIDES: Shortcut = Shortcut::new("Backspace", true, true, "Clear manual guides");

/// Overlay data for the gesture in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuidelinesState {
    /// Element being dragged or resized.
    pub active: Option<ElementId>,
    pub matches: AlignmentMatches,
    pub distances: Vec<DistanceGuidelineMatch>,
    pub resize: Option<ResizeSnap>,
    /// Manual guide being dragged.
    pub active_guide: Option<GuideId>,
}

impl GuidelinesState {
    /// Whether there is anything to draw.
    pub fn is_active(&self) -> bool {
        self.active.is_some() || self.active_guide.is_some()
    }

    fn show(&mut self, id: ElementId, update: &DragUpdate) {
        self.active = Some(id);
        self.matches = update.matches.clone();
        self.distances = update.distances.clone();
        self.resize = update.resize;
    }
}

#[derive(Debug)]
enum Gesture {
    Element { session: DragSession, start: Point },
    Guide { id: GuideId, orientation: GuideOrientation, original: f64 },
}

/// Runs a [`DragSession`] for each element drag and publishes its matches in
/// [`GuidelinesState`].
#[derive(Debug, Default)]
pub struct GuidelinesPlugin {
    gesture: Option<Gesture>,
}

impl GuidelinesPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    fn slice(state: &mut AppState) -> Option<&mut GuidelinesState> {
        state.plugin_state_mut::<GuidelinesState>()
    }

    fn clear_overlay(state: &mut AppState) {
        if let Some(slice) = Self::slice(state) {
            *slice = GuidelinesState::default();
        }
    }

    fn pointer_down(&mut self, state: &mut AppState, position: Point, shift: bool) -> EventResponse {
        let tolerance = state.viewport.screen_to_world_len(HANDLE_HIT_TOLERANCE);

        // Resize handles of a single selected element win over everything else
        if let &[selected] = state.selection() {
            let handle = state
                .bounds_of(selected)
                .and_then(|bounds| hit_test_handles(bounds, position, tolerance));
            if let Some(handle) = handle {
                return self.begin_element(state, selected, DragKind::Resize(handle), position);
            }
        }

        if let Some(id) = state.elements().element_at(position, tolerance / 2.0) {
            if shift {
                state.add_to_selection(id);
            } else if !state.is_selected(id) {
                state.select(id);
            }
            return self.begin_element(state, id, DragKind::Move, position);
        }

        if let Some(id) = state.guides().find_near(position, tolerance / 2.0) {
            if let Some(guide) = state.guides().get(id).filter(|g| !g.locked) {
                self.gesture = Some(Gesture::Guide {
                    id,
                    orientation: guide.orientation,
                    original: guide.position,
                });
                if let Some(slice) = Self::slice(state) {
                    slice.active_guide = Some(id);
                }
                return EventResponse::Handled;
            }
        }

        state.clear_selection();
        EventResponse::Ignored
    }

    fn begin_element(
        &mut self,
        state: &mut AppState,
        id: ElementId,
        kind: DragKind,
        start: Point,
    ) -> EventResponse {
        match DragSession::begin(state, id, kind) {
            Ok(session) => {
                self.gesture = Some(Gesture::Element { session, start });
                if let Some(slice) = Self::slice(state) {
                    slice.active = Some(id);
                }
            }
            Err(e) => log::debug!("Not dragging: {}", e),
        }
        EventResponse::Handled
    }

    fn pointer_move(&mut self, state: &mut AppState, position: Point) -> EventResponse {
        match &mut self.gesture {
            Some(Gesture::Element { session, start }) => {
                let update = session.update_pointer(state, position - *start);
                let id = session.element_id();
                if let Err(e) = session.commit(state, &update) {
                    log::warn!("Drag on {} aborted: {}", id, e);
                    self.gesture = None;
                    Self::clear_overlay(state);
                    return EventResponse::Handled;
                }
                if let Some(slice) = Self::slice(state) {
                    slice.show(id, &update);
                }
                EventResponse::Handled
            }
            Some(Gesture::Guide { id, orientation, .. }) => {
                let grid = &state.settings.grid;
                let point = if grid.snap {
                    snap_to_grid(position, grid.size).point
                } else {
                    position
                };
                let coordinate = match orientation {
                    GuideOrientation::Horizontal => point.y,
                    GuideOrientation::Vertical => point.x,
                };
                if let Err(e) = state.move_guide(*id, coordinate) {
                    log::warn!("Cannot move guide: {}", e);
                }
                EventResponse::Handled
            }
            None => EventResponse::Ignored,
        }
    }

    fn pointer_up(&mut self, state: &mut AppState) -> EventResponse {
        let Some(gesture) = self.gesture.take() else {
            return EventResponse::Ignored;
        };
        if let Gesture::Element { session, .. } = gesture {
            let id = session.element_id();
            if let Some(update) = session.end() {
                log::debug!("Dropped {} at {:?}", id, update.bounds.origin());
            }
        }
        Self::clear_overlay(state);
        EventResponse::Handled
    }

    fn cancel(&mut self, state: &mut AppState) -> EventResponse {
        let Some(gesture) = self.gesture.take() else {
            return EventResponse::Ignored;
        };
        let result = match gesture {
            Gesture::Element { session, .. } => session.cancel(state).map(|_| ()),
            Gesture::Guide { id, original, .. } => state.move_guide(id, original),
        };
        if let Err(e) = result {
            log::warn!("Cancel failed: {}", e);
        }
        Self::clear_overlay(state);
        EventResponse::Handled
    }
}

impl Plugin for GuidelinesPlugin {
    fn id(&self) -> &'static str {
        GuidelinesState::PLUGIN_ID
    }

    fn initial_state(&self) -> Option<PluginState> {
        Some(PluginState::Guidelines(GuidelinesState::default()))
    }

    fn shortcuts(&self) -> Vec<Shortcut> {
        vec![TOGGLE_GUIDES, TOGGLE_DISTANCES, CLEAR_GUIDES]
    }

    fn on_pointer(&mut self, state: &mut AppState, event: &PointerEvent) -> EventResponse {
        match *event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
                modifiers,
            } if self.gesture.is_none() => self.pointer_down(state, position, modifiers.shift),
            PointerEvent::Move { position, .. } => self.pointer_move(state, position),
            PointerEvent::Up {
                button: MouseButton::Left,
                ..
            } => self.pointer_up(state),
            _ => EventResponse::Ignored,
        }
    }

    fn on_key(&mut self, state: &mut AppState, key: &KeyPress) -> EventResponse {
        if key.is_plain("Escape") {
            return self.cancel(state);
        }

        let settings = &mut state.settings.guidelines;
        if TOGGLE_GUIDES.matches(key) {
            settings.enabled = !settings.enabled;
            log::info!("Smart guides {}", if settings.enabled { "on" } else { "off" });
        } else if TOGGLE_DISTANCES.matches(key) {
            settings.show_distances = !settings.show_distances;
        } else if CLEAR_GUIDES.matches(key) {
            state.clear_guides();
        } else {
            return EventResponse::Ignored;
        }
        EventResponse::Handled
    }
}

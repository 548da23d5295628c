//! Grid visibility and snapping toggles.

use super::{Plugin, Shortcut};
use crate::input::{EventResponse, KeyPress};
use crate::state::AppState;

const TOGGLE_GRID: Shortcut = Shortcut::new("'", true, false, "Show/hide grid");
const TOGGLE_SNAP: Shortcut = Shortcut::new("'", true, true, "Snap to grid");

/// Keyboard control over [`GridSettings`](crate::settings::GridSettings).
///
/// Grid snapping itself runs inside the drag session as the fallback for axes
/// no guideline claimed, so this plugin keeps no state.
#[derive(Debug, Default)]
pub struct GridPlugin;

impl Plugin for GridPlugin {
    fn id(&self) -> &'static str {
        "grid"
    }

    fn shortcuts(&self) -> Vec<Shortcut> {
        vec![TOGGLE_GRID, TOGGLE_SNAP]
    }

    fn on_key(&mut self, state: &mut AppState, key: &KeyPress) -> EventResponse {
        let grid = &mut state.settings.grid;
        if TOGGLE_GRID.matches(key) {
            grid.visible = !grid.visible;
        } else if TOGGLE_SNAP.matches(key) {
            grid.snap = !grid.snap;
            log::info!("Grid snapping {}", if grid.snap { "on" } else { "off" });
        } else {
            return EventResponse::Ignored;
        }
        EventResponse::Handled
    }
}

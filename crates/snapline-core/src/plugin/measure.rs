//! Alt-hover measurement between the selection and the element under the pointer.

use super::{Plugin, PluginSlice, PluginState};
use crate::elements::ElementId;
use crate::input::{EventResponse, PointerEvent};
use crate::measure::{Measurement, measure};
use crate::selection::HANDLE_HIT_TOLERANCE;
use crate::state::AppState;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasureState {
    pub hovered: Option<ElementId>,
    pub measurement: Option<Measurement>,
}

/// Shows distances from the single selected element to the hovered one while
/// Alt is held. Never consumes events.
#[derive(Debug, Default)]
pub struct MeasurePlugin;

impl MeasurePlugin {
    fn compute(state: &AppState, event: &PointerEvent) -> MeasureState {
        let &[selected] = state.selection() else {
            return MeasureState::default();
        };
        let tolerance = state.viewport.screen_to_world_len(HANDLE_HIT_TOLERANCE) / 2.0;
        let hovered = state
            .elements()
            .element_at(event.position(), tolerance)
            .filter(|id| *id != selected);
        let measurement = hovered.and_then(|h| {
            let from = state.bounds_of(selected)?;
            let to = state.bounds_of(h)?;
            measure(from, to)
        });
        MeasureState { hovered, measurement }
    }
}

impl Plugin for MeasurePlugin {
    fn id(&self) -> &'static str {
        MeasureState::PLUGIN_ID
    }

    fn initial_state(&self) -> Option<PluginState> {
        Some(PluginState::Measure(MeasureState::default()))
    }

    fn on_pointer(&mut self, state: &mut AppState, event: &PointerEvent) -> EventResponse {
        let next = match event {
            PointerEvent::Move { modifiers, .. } if modifiers.alt => Self::compute(state, event),
            _ => MeasureState::default(),
        };
        if let Some(slice) = state.plugin_state_mut::<MeasureState>() {
            if *slice != next {
                *slice = next;
            }
        }
        EventResponse::Ignored
    }
}

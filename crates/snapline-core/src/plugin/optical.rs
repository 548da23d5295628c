//! Optical alignment command.

use super::{Plugin, PluginSlice, PluginState, Shortcut};
use crate::input::{EventResponse, KeyPress};
use crate::optical::{OpticalResult, align_all, align_selection};
use crate::settings::OpticalMode;
use crate::state::AppState;

const ALIGN: Shortcut = Shortcut::new("O", true, true, "Optically center in container");
const TOGGLE_MODE: Shortcut = Shortcut::new("M", true, true, "Switch optical/mathematical centering");

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpticalState {
    /// Alignments applied by the last command.
    pub last_results: Vec<OpticalResult>,
}

/// Centers the selection (or, with nothing selected, every nested element)
/// inside its container.
#[derive(Debug, Default)]
pub struct OpticalPlugin;

impl OpticalPlugin {
    /// Run the alignment command and record what it did.
    pub fn run(state: &mut AppState) -> usize {
        let results = if state.selection().is_empty() {
            align_all(state)
        } else {
            align_selection(state)
        };
        let count = results.len();
        if let Some(slice) = state.plugin_state_mut::<OpticalState>() {
            slice.last_results = results;
        }
        count
    }
}

impl Plugin for OpticalPlugin {
    fn id(&self) -> &'static str {
        OpticalState::PLUGIN_ID
    }

    fn initial_state(&self) -> Option<PluginState> {
        Some(PluginState::Optical(OpticalState::default()))
    }

    fn shortcuts(&self) -> Vec<Shortcut> {
        vec![ALIGN, TOGGLE_MODE]
    }

    fn on_key(&mut self, state: &mut AppState, key: &KeyPress) -> EventResponse {
        if ALIGN.matches(key) {
            let count = Self::run(state);
            log::info!("Optical alignment moved {} element(s)", count);
            EventResponse::Handled
        } else if TOGGLE_MODE.matches(key) {
            let optical = &mut state.settings.optical;
            optical.mode = match optical.mode {
                OpticalMode::Visual => OpticalMode::Mathematical,
                OpticalMode::Mathematical => OpticalMode::Visual,
            };
            EventResponse::Handled
        } else {
            EventResponse::Ignored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Element, ElementStyle, SerializableColor};
    use crate::input::Modifiers;
    use kurbo::Rect;

    #[test]
    fn test_shortcut_aligns_and_records() {
        let mut state = AppState::new();
        let mut plugin = OpticalPlugin;
        state.insert_plugin_state(OpticalState::PLUGIN_ID, plugin.initial_state().unwrap());
        state.settings.optical.mode = OpticalMode::Mathematical;
        state.add_element(Element::rect(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            ElementStyle::filled(SerializableColor::white()),
        ));
        let icon = state.add_element(Element::rect(
            Rect::new(10.0, 10.0, 30.0, 30.0),
            ElementStyle::filled(SerializableColor::black()),
        ));

        let press = KeyPress::new(
            "O",
            Modifiers {
                ctrl: true,
                shift: true,
                ..Modifiers::default()
            },
        );
        assert!(plugin.on_key(&mut state, &press).is_handled());
        assert_eq!(state.bounds_of(icon), Some(Rect::new(40.0, 40.0, 60.0, 60.0)));
        let slice = state.plugin_state::<OpticalState>().unwrap();
        assert_eq!(slice.last_results.len(), 1);
        assert_eq!(slice.last_results[0].pair.content, icon);
    }

    #[test]
    fn test_mode_toggle() {
        let mut state = AppState::new();
        let mut plugin = OpticalPlugin;
        let press = KeyPress::new(
            "M",
            Modifiers {
                ctrl: true,
                shift: true,
                ..Modifiers::default()
            },
        );
        let before = state.settings.optical.mode;
        plugin.on_key(&mut state, &press);
        assert_ne!(state.settings.optical.mode, before);
    }
}

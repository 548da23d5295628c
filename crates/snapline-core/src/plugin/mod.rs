//! Editor plugins: event handlers, keyboard shortcuts and per-plugin state.
//!
//! Each plugin contributes an optional state slice stored in
//! [`AppState`](crate::state::AppState) and reacts to pointer and key events.
//! The [`PluginRegistry`] dispatches events to plugins in registration order;
//! the first plugin that handles an event stops the dispatch.

mod grid;
mod guidelines;
mod measure;
mod optical;

pub use grid::GridPlugin;
pub use guidelines::{GuidelinesPlugin, GuidelinesState};
pub use measure::{MeasurePlugin, MeasureState};
pub use optical::{OpticalPlugin, OpticalState};

use crate::input::{EventResponse, KeyPress, PointerEvent};
use crate::state::AppState;
use thiserror::Error;

/// Plugin registration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PluginError {
    #[error("Plugin already registered: {0}")]
    Duplicate(&'static str),
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, ctrl: bool, shift: bool, description: &'static str) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Shift+O").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    /// Whether `press` triggers this shortcut. Cmd counts as Ctrl.
    pub fn matches(&self, press: &KeyPress) -> bool {
        press.key.eq_ignore_ascii_case(self.key)
            && press.modifiers.command() == self.ctrl
            && press.modifiers.shift == self.shift
            && !press.modifiers.alt
    }
}

/// State slices owned by plugins.
#[derive(Debug, Clone, PartialEq)]
pub enum PluginState {
    Guidelines(GuidelinesState),
    Optical(OpticalState),
    Measure(MeasureState),
}

/// A concrete state slice type, stored in [`AppState`] under its plugin's id.
pub trait PluginSlice: Sized {
    const PLUGIN_ID: &'static str;

    fn from_state(state: &PluginState) -> Option<&Self>;
    fn from_state_mut(state: &mut PluginState) -> Option<&mut Self>;
}

impl PluginSlice for GuidelinesState {
    const PLUGIN_ID: &'static str = "guidelines";

    fn from_state(state: &PluginState) -> Option<&Self> {
        match state {
            PluginState::Guidelines(s) => Some(s),
            _ => None,
        }
    }

    fn from_state_mut(state: &mut PluginState) -> Option<&mut Self> {
        match state {
            PluginState::Guidelines(s) => Some(s),
            _ => None,
        }
    }
}

impl PluginSlice for OpticalState {
    const PLUGIN_ID: &'static str = "optical";

    fn from_state(state: &PluginState) -> Option<&Self> {
        match state {
            PluginState::Optical(s) => Some(s),
            _ => None,
        }
    }

    fn from_state_mut(state: &mut PluginState) -> Option<&mut Self> {
        match state {
            PluginState::Optical(s) => Some(s),
            _ => None,
        }
    }
}

impl PluginSlice for MeasureState {
    const PLUGIN_ID: &'static str = "measure";

    fn from_state(state: &PluginState) -> Option<&Self> {
        match state {
            PluginState::Measure(s) => Some(s),
            _ => None,
        }
    }

    fn from_state_mut(state: &mut PluginState) -> Option<&mut Self> {
        match state {
            PluginState::Measure(s) => Some(s),
            _ => None,
        }
    }
}

/// An editor plugin.
pub trait Plugin {
    /// Unique id, also the key of the plugin's state slice.
    fn id(&self) -> &'static str;

    /// State slice installed on registration.
    fn initial_state(&self) -> Option<PluginState> {
        None
    }

    /// Keyboard shortcuts, for help listings.
    fn shortcuts(&self) -> Vec<Shortcut> {
        Vec::new()
    }

    fn on_pointer(&mut self, _state: &mut AppState, _event: &PointerEvent) -> EventResponse {
        EventResponse::Ignored
    }

    fn on_key(&mut self, _state: &mut AppState, _key: &KeyPress) -> EventResponse {
        EventResponse::Ignored
    }
}

/// Ordered plugin registry.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Box<dyn Plugin>>,
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugins", &self.ids())
            .finish()
    }
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in plugins: guidelines, grid, measure, optical.
    pub fn with_defaults(state: &mut AppState) -> Self {
        let mut registry = Self::new();
        let defaults: Vec<Box<dyn Plugin>> = vec![
            Box::new(GuidelinesPlugin::new()),
            Box::new(GridPlugin),
            Box::new(MeasurePlugin),
            Box::new(OpticalPlugin),
        ];
        for plugin in defaults {
            if let Err(e) = registry.register(state, plugin) {
                log::warn!("{}", e);
            }
        }
        registry
    }

    /// Add a plugin after the existing ones and install its state slice.
    pub fn register(&mut self, state: &mut AppState, plugin: Box<dyn Plugin>) -> Result<(), PluginError> {
        let id = plugin.id();
        if self.plugins.iter().any(|p| p.id() == id) {
            return Err(PluginError::Duplicate(id));
        }
        if let Some(slice) = plugin.initial_state() {
            state.insert_plugin_state(id, slice);
        }
        log::debug!("Registered plugin {}", id);
        self.plugins.push(plugin);
        Ok(())
    }

    /// Plugin ids in dispatch order.
    pub fn ids(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.id()).collect()
    }

    /// All shortcuts with the id of the plugin providing them.
    pub fn shortcuts(&self) -> Vec<(&'static str, Shortcut)> {
        self.plugins
            .iter()
            .flat_map(|p| {
                let id = p.id();
                p.shortcuts().into_iter().map(move |s| (id, s))
            })
            .collect()
    }

    pub fn dispatch_pointer(&mut self, state: &mut AppState, event: &PointerEvent) -> EventResponse {
        for plugin in &mut self.plugins {
            if plugin.on_pointer(state, event).is_handled() {
                return EventResponse::Handled;
            }
        }
        EventResponse::Ignored
    }

    pub fn dispatch_key(&mut self, state: &mut AppState, key: &KeyPress) -> EventResponse {
        for plugin in &mut self.plugins {
            if plugin.on_key(state, key).is_handled() {
                log::trace!("Key {} handled by {}", key.key, plugin.id());
                return EventResponse::Handled;
            }
        }
        EventResponse::Ignored
    }
}

//! Application state shared by all plugins.

use crate::elements::{Element, ElementId, ElementStore, FrameId};
use crate::guides::{GuideId, GuideOrientation, GuideSet};
use crate::plugin::{PluginSlice, PluginState};
use crate::settings::EditorSettings;
use crate::viewport::Viewport;
use kurbo::{Rect, Vec2};
use std::collections::HashMap;
use thiserror::Error;

/// Errors from state mutations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StateError {
    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),
    #[error("Element is locked: {0}")]
    ElementLocked(ElementId),
    #[error("Guide not found: {0}")]
    GuideNotFound(GuideId),
    #[error("Guide is locked: {0}")]
    GuideLocked(GuideId),
}

/// A change recorded by [`AppState`], drained by observers with
/// [`AppState::take_changes`].
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    ElementAdded(ElementId),
    ElementRemoved(ElementId),
    ElementUpdated {
        id: ElementId,
        before: Rect,
        after: Rect,
    },
    SelectionChanged,
    GuidesChanged,
    PluginStateChanged(&'static str),
}

/// Document, view and plugin state.
///
/// Elements and guides are only mutated through methods that bump
/// [`AppState::revision`] and record a [`StateChange`], so caches can tell when
/// they went stale.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    elements: ElementStore,
    selection: Vec<ElementId>,
    guides: GuideSet,
    pub viewport: Viewport,
    pub settings: EditorSettings,
    plugin_states: HashMap<&'static str, PluginState>,
    revision: u64,
    changes: Vec<StateChange>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: EditorSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    fn record(&mut self, change: StateChange) {
        self.revision += 1;
        self.changes.push(change);
    }

    /// Counter bumped on every recorded change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Drain the changes recorded since the last call.
    pub fn take_changes(&mut self) -> Vec<StateChange> {
        std::mem::take(&mut self.changes)
    }

    // --- Elements ---

    pub fn elements(&self) -> &ElementStore {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn bounds_of(&self, id: ElementId) -> Option<Rect> {
        self.elements.bounds_of(id)
    }

    pub fn add_element(&mut self, element: Element) -> ElementId {
        let id = self.elements.add(element);
        self.record(StateChange::ElementAdded(id));
        id
    }

    pub fn remove_element(&mut self, id: ElementId) -> Option<Element> {
        let removed = self.elements.remove(id)?;
        if self.selection.contains(&id) {
            self.selection.retain(|&s| s != id);
            self.record(StateChange::SelectionChanged);
        }
        self.record(StateChange::ElementRemoved(id));
        Some(removed)
    }

    /// Mutate an element in place. Returns its bounds after the update.
    ///
    /// Locked elements are rejected.
    pub fn update_element<F>(&mut self, id: ElementId, f: F) -> Result<Rect, StateError>
    where
        F: FnOnce(&mut Element),
    {
        let element = self
            .elements
            .get_mut(id)
            .ok_or(StateError::ElementNotFound(id))?;
        if element.locked {
            return Err(StateError::ElementLocked(id));
        }
        let before = element.bounds();
        f(element);
        let after = element.bounds();
        self.record(StateChange::ElementUpdated { id, before, after });
        Ok(after)
    }

    pub fn translate_element(&mut self, id: ElementId, delta: Vec2) -> Result<Rect, StateError> {
        self.update_element(id, |el| el.translate(delta))
    }

    pub fn resize_element(&mut self, id: ElementId, to: Rect) -> Result<Rect, StateError> {
        self.update_element(id, |el| el.resize_to(to))
    }

    /// Lock or unlock an element. Works on locked elements too.
    pub fn set_element_locked(&mut self, id: ElementId, locked: bool) -> Result<(), StateError> {
        let element = self
            .elements
            .get_mut(id)
            .ok_or(StateError::ElementNotFound(id))?;
        element.locked = locked;
        let bounds = element.bounds();
        self.record(StateChange::ElementUpdated {
            id,
            before: bounds,
            after: bounds,
        });
        Ok(())
    }

    // --- Selection ---

    pub fn selection(&self) -> &[ElementId] {
        &self.selection
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selection.contains(&id)
    }

    /// Select an element (clears previous selection).
    pub fn select(&mut self, id: ElementId) {
        self.selection.clear();
        self.selection.push(id);
        self.record(StateChange::SelectionChanged);
    }

    pub fn add_to_selection(&mut self, id: ElementId) {
        if !self.selection.contains(&id) {
            self.selection.push(id);
            self.record(StateChange::SelectionChanged);
        }
    }

    pub fn clear_selection(&mut self) {
        if !self.selection.is_empty() {
            self.selection.clear();
            self.record(StateChange::SelectionChanged);
        }
    }

    // --- Guides ---

    pub fn guides(&self) -> &GuideSet {
        &self.guides
    }

    pub fn add_guide(
        &mut self,
        orientation: GuideOrientation,
        position: f64,
        frame_id: Option<FrameId>,
    ) -> GuideId {
        let id = self.guides.add(orientation, position, frame_id);
        self.record(StateChange::GuidesChanged);
        id
    }

    pub fn remove_guide(&mut self, id: GuideId) -> Result<(), StateError> {
        self.guides.remove(id).ok_or(StateError::GuideNotFound(id))?;
        self.record(StateChange::GuidesChanged);
        Ok(())
    }

    pub fn move_guide(&mut self, id: GuideId, position: f64) -> Result<(), StateError> {
        self.guides.move_guide(id, position)?;
        self.record(StateChange::GuidesChanged);
        Ok(())
    }

    pub fn set_guide_locked(&mut self, id: GuideId, locked: bool) -> Result<(), StateError> {
        self.guides.set_locked(id, locked)?;
        self.record(StateChange::GuidesChanged);
        Ok(())
    }

    pub fn clear_guides(&mut self) {
        if !self.guides.is_empty() {
            self.guides.clear();
            self.record(StateChange::GuidesChanged);
        }
    }

    // --- Plugin state ---

    /// Install a plugin's state slice, replacing any previous one.
    pub fn insert_plugin_state(&mut self, plugin_id: &'static str, state: PluginState) {
        self.plugin_states.insert(plugin_id, state);
        self.record(StateChange::PluginStateChanged(plugin_id));
    }

    /// Typed view of a plugin's state slice.
    pub fn plugin_state<T: PluginSlice>(&self) -> Option<&T> {
        self.plugin_states.get(T::PLUGIN_ID).and_then(T::from_state)
    }

    /// Typed mutable view of a plugin's state slice.
    ///
    /// Writes through this view are transient overlay data and are not
    /// recorded as changes.
    pub fn plugin_state_mut<T: PluginSlice>(&mut self) -> Option<&mut T> {
        self.plugin_states
            .get_mut(T::PLUGIN_ID)
            .and_then(T::from_state_mut)
    }
}

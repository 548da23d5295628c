//! Snapline Core Library
//!
//! Platform-agnostic snapping engine for the Snapline vector editor: smart
//! alignment guides, equal-spacing detection, sticky snapping, resize snapping,
//! grid snapping, measurement and optical alignment.

pub mod elements;
pub mod geometry;
pub mod grid;
pub mod guidelines;
pub mod guides;
pub mod input;
pub mod measure;
pub mod optical;
pub mod plugin;
pub mod selection;
pub mod settings;
pub mod state;
pub mod viewport;

pub use elements::{Element, ElementId, ElementStore, ElementStyle, FrameId, SerializableColor};
pub use geometry::Axis;
pub use grid::{SnapResult, snap_to_grid};
pub use guidelines::{
    AlignmentKind, AlignmentMatches, DistanceGuidelineMatch, DragKind, DragSession, DragUpdate,
    GuidelineMatch, SnapContext,
};
pub use guides::{GuideId, GuideOrientation, ManualGuide};
pub use input::{EventResponse, KeyPress, Modifiers, MouseButton, PointerEvent};
pub use plugin::{Plugin, PluginRegistry, PluginState};
pub use selection::ResizeHandle;
pub use settings::EditorSettings;
pub use state::{AppState, StateChange, StateError};
pub use viewport::Viewport;

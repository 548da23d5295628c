//! End-to-end editing through the plugin registry.

use kurbo::{Point, Rect};
use snapline_core::elements::{Element, ElementId, ElementStyle, SerializableColor};
use snapline_core::guidelines::AlignmentKind;
use snapline_core::input::{KeyPress, Modifiers, MouseButton, PointerEvent};
use snapline_core::plugin::{GuidelinesState, MeasureState, OpticalState, PluginRegistry};
use snapline_core::settings::{EditorSettings, OpticalMode};
use snapline_core::state::{AppState, StateChange};

fn add(state: &mut AppState, x0: f64, y0: f64, x1: f64, y1: f64) -> ElementId {
    state.add_element(Element::rect(
        Rect::new(x0, y0, x1, y1),
        ElementStyle::filled(SerializableColor::black()),
    ))
}

fn down(x: f64, y: f64) -> PointerEvent {
    PointerEvent::Down {
        position: Point::new(x, y),
        button: MouseButton::Left,
        modifiers: Modifiers::NONE,
    }
}

fn drag(x: f64, y: f64) -> PointerEvent {
    PointerEvent::Move {
        position: Point::new(x, y),
        modifiers: Modifiers::NONE,
    }
}

fn up(x: f64, y: f64) -> PointerEvent {
    PointerEvent::Up {
        position: Point::new(x, y),
        button: MouseButton::Left,
    }
}

fn ctrl_shift(key: &str) -> KeyPress {
    KeyPress::new(
        key,
        Modifiers {
            ctrl: true,
            shift: true,
            ..Modifiers::default()
        },
    )
}

#[test]
fn sticky_drag_holds_then_releases() {
    let mut state = AppState::new();
    let mut registry = PluginRegistry::with_defaults(&mut state);
    add(&mut state, 100.0, 200.0, 150.0, 250.0);
    let moving = add(&mut state, 0.0, 0.0, 10.0, 10.0);
    state.take_changes();

    assert!(registry.dispatch_pointer(&mut state, &down(5.0, 5.0)).is_handled());

    registry.dispatch_pointer(&mut state, &drag(102.0, 5.0));
    assert_eq!(state.bounds_of(moving).map(|b| b.x0), Some(100.0));
    let slice = state.plugin_state::<GuidelinesState>().unwrap();
    assert_eq!(
        slice.matches.horizontal.as_ref().map(|m| m.kind),
        Some(AlignmentKind::Left)
    );

    // Still held 6 past the guide
    registry.dispatch_pointer(&mut state, &drag(111.0, 5.0));
    assert_eq!(state.bounds_of(moving).map(|b| b.x0), Some(100.0));

    // Breaks free once the pull exceeds the break distance
    registry.dispatch_pointer(&mut state, &drag(116.0, 5.0));
    assert_eq!(state.bounds_of(moving).map(|b| b.x0), Some(111.0));

    registry.dispatch_pointer(&mut state, &up(116.0, 5.0));
    assert!(!state.plugin_state::<GuidelinesState>().unwrap().is_active());

    let changes = state.take_changes();
    assert!(changes.contains(&StateChange::SelectionChanged));
    assert!(changes
        .iter()
        .any(|c| matches!(c, StateChange::ElementUpdated { id, .. } if *id == moving)));
}

#[test]
fn escape_cancels_drag() {
    let mut state = AppState::new();
    let mut registry = PluginRegistry::with_defaults(&mut state);
    let moving = add(&mut state, 0.0, 0.0, 10.0, 10.0);

    registry.dispatch_pointer(&mut state, &down(5.0, 5.0));
    registry.dispatch_pointer(&mut state, &drag(60.0, 45.0));
    assert_eq!(state.bounds_of(moving), Some(Rect::new(55.0, 40.0, 65.0, 50.0)));

    let escape = KeyPress::new("Escape", Modifiers::NONE);
    assert!(registry.dispatch_key(&mut state, &escape).is_handled());
    assert_eq!(state.bounds_of(moving), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));

    // Moves after the cancel do nothing
    registry.dispatch_pointer(&mut state, &drag(80.0, 80.0));
    assert_eq!(state.bounds_of(moving), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
}

#[test]
fn resize_handle_snaps_to_neighbor_edge() {
    let mut state = AppState::new();
    let mut registry = PluginRegistry::with_defaults(&mut state);
    let moving = add(&mut state, 0.0, 0.0, 10.0, 10.0);
    add(&mut state, 40.0, 0.0, 60.0, 10.0);
    state.select(moving);

    registry.dispatch_pointer(&mut state, &down(10.0, 10.0));
    registry.dispatch_pointer(&mut state, &drag(38.0, 10.0));
    assert_eq!(state.bounds_of(moving), Some(Rect::new(0.0, 0.0, 40.0, 10.0)));

    let resize = state.plugin_state::<GuidelinesState>().unwrap().resize.unwrap();
    assert_eq!(resize.snapped_x, Some(40.0));
    registry.dispatch_pointer(&mut state, &up(38.0, 10.0));
}

#[test]
fn alt_hover_measures_from_selection() {
    let mut state = AppState::new();
    let mut registry = PluginRegistry::with_defaults(&mut state);
    let selected = add(&mut state, 0.0, 0.0, 20.0, 20.0);
    let other = add(&mut state, 0.0, 50.0, 20.0, 70.0);
    state.select(selected);

    let hover = PointerEvent::Move {
        position: Point::new(10.0, 60.0),
        modifiers: Modifiers {
            alt: true,
            ..Modifiers::default()
        },
    };
    assert!(!registry.dispatch_pointer(&mut state, &hover).is_handled());

    let slice = state.plugin_state::<MeasureState>().unwrap();
    assert_eq!(slice.hovered, Some(other));
    let segment = slice.measurement.as_ref().unwrap().segments[0];
    assert_eq!(segment.length(), 30.0);
    assert_eq!(segment.cross, 10.0);
}

#[test]
fn optical_shortcut_centers_selection() {
    let mut state = AppState::new();
    let mut registry = PluginRegistry::with_defaults(&mut state);
    state.settings.optical.mode = OpticalMode::Mathematical;
    add(&mut state, 0.0, 0.0, 200.0, 100.0);
    let icon = add(&mut state, 10.0, 10.0, 30.0, 30.0);
    state.select(icon);

    assert!(registry.dispatch_key(&mut state, &ctrl_shift("O")).is_handled());
    assert_eq!(state.bounds_of(icon), Some(Rect::new(90.0, 40.0, 110.0, 60.0)));
    assert_eq!(
        state.plugin_state::<OpticalState>().map(|s| s.last_results.len()),
        Some(1)
    );
}

#[test]
fn settings_file_drives_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "guidelines": { "threshold_px": 2.0 } }"#).unwrap();

    let mut state = AppState::with_settings(EditorSettings::load(&path).unwrap());
    let mut registry = PluginRegistry::with_defaults(&mut state);
    add(&mut state, 100.0, 200.0, 150.0, 250.0);
    let moving = add(&mut state, 0.0, 0.0, 10.0, 10.0);

    // 3 away: inside the default threshold, outside this one
    registry.dispatch_pointer(&mut state, &down(5.0, 5.0));
    registry.dispatch_pointer(&mut state, &drag(102.0, 5.0));
    assert_eq!(state.bounds_of(moving).map(|b| b.x0), Some(97.0));
}

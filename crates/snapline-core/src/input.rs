//! Pointer and keyboard events delivered to plugins.
//!
//! Positions are in canvas (document) coordinates; the host converts from
//! screen space with [`Viewport::screen_to_world`](crate::viewport::Viewport::screen_to_world).

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
    },
    Move {
        position: Point,
        modifiers: Modifiers,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position, .. }
            | PointerEvent::Up { position, .. } => position,
        }
    }

    /// Modifiers held during the event (none reported on release).
    pub fn modifiers(&self) -> Modifiers {
        match *self {
            PointerEvent::Down { modifiers, .. } | PointerEvent::Move { modifiers, .. } => modifiers,
            PointerEvent::Up { .. } => Modifiers::NONE,
        }
    }
}

/// A key press, named the way the host reports it (`"Escape"`, `"G"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }

    /// Whether this is `key` with no modifiers, compared case-insensitively.
    pub fn is_plain(&self, key: &str) -> bool {
        self.modifiers == Modifiers::NONE && self.key.eq_ignore_ascii_case(key)
    }
}

/// Whether a plugin consumed an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    Handled,
    Ignored,
}

impl EventResponse {
    pub fn is_handled(self) -> bool {
        self == EventResponse::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_accessors() {
        let shift = Modifiers {
            shift: true,
            ..Modifiers::default()
        };
        let down = PointerEvent::Down {
            position: Point::new(3.0, 4.0),
            button: MouseButton::Left,
            modifiers: shift,
        };
        assert_eq!(down.position(), Point::new(3.0, 4.0));
        assert!(down.modifiers().shift);

        let up = PointerEvent::Up {
            position: Point::new(5.0, 6.0),
            button: MouseButton::Left,
        };
        assert_eq!(up.modifiers(), Modifiers::NONE);
    }

    #[test]
    fn test_key_press() {
        assert!(KeyPress::new("escape", Modifiers::NONE).is_plain("Escape"));
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::default()
        };
        assert!(!KeyPress::new("G", ctrl).is_plain("G"));
        assert!(ctrl.command());
    }
}

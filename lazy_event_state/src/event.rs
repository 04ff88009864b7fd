// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Normalized input events and control responses.
//!
//! A host windowing layer translates its native events into [`InputEvent`] values. Pointer
//! positions are in the same coordinate space as the node bounds the host assigns.

use kurbo::{Point, Vec2};

bitflags::bitflags! {
    /// Modifier keys held while a key event was produced.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Control (or the platform's primary shortcut modifier).
        const CONTROL = 0b0000_0001;
        /// Shift.
        const SHIFT   = 0b0000_0010;
        /// Alt / Option.
        const ALT     = 0b0000_0100;
    }
}

bitflags::bitflags! {
    /// What a control did with an event or update.
    ///
    /// Controls return these flags instead of calling back into the context, which keeps
    /// them free of any reference to the undo store or the dispatcher.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Response: u8 {
        /// The event was handled and should not trigger fallbacks.
        const CONSUMED      = 0b0000_0001;
        /// The control's value changed.
        const VALUE_CHANGED = 0b0000_0010;
        /// A logically complete edit finished; the context takes an undo snapshot.
        const ACTION_ENDED  = 0b0000_0100;
        /// The value was clipped to the control's bounds during this update.
        const CONSTRAINED   = 0b0000_1000;
    }
}

/// Logical key identity, independent of the character it produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A letter, digit or symbol key, reported as its unshifted lowercase character.
    Key(char),
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Enter / Return.
    Enter,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// A bare Shift press.
    Shift,
    /// A bare Control press.
    Control,
    /// A bare Alt press.
    Alt,
    /// Any other key, by host key code.
    Other(u32),
}

/// A key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// Logical key.
    pub code: KeyCode,
    /// The literal character produced, if any.
    pub ch: Option<char>,
    /// Modifiers held during the press.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A plain character key without modifiers.
    pub fn char(ch: char) -> Self {
        Self {
            code: KeyCode::Key(ch.to_ascii_lowercase()),
            ch: Some(ch),
            modifiers: Modifiers::empty(),
        }
    }

    /// A Control + `letter` shortcut. Hosts typically report no printable character for these.
    pub fn ctrl(letter: char) -> Self {
        Self {
            code: KeyCode::Key(letter.to_ascii_lowercase()),
            ch: None,
            modifiers: Modifiers::CONTROL,
        }
    }

    /// A non-printing key.
    pub fn named(code: KeyCode) -> Self {
        Self {
            code,
            ch: None,
            modifiers: Modifiers::empty(),
        }
    }

    /// Returns the same event with `modifiers` added.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    /// True for Control + `letter`, regardless of the produced character.
    pub fn is_shortcut(&self, letter: char) -> bool {
        self.modifiers.contains(Modifiers::CONTROL)
            && self.code == KeyCode::Key(letter.to_ascii_lowercase())
    }

    /// The produced character when no Control modifier is held.
    pub fn typed_char(&self) -> Option<char> {
        if self.modifiers.contains(Modifiers::CONTROL) {
            None
        } else {
            self.ch
        }
    }
}

/// Pointer button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primary (usually left) button.
    #[default]
    Primary,
    /// Secondary (usually right) button.
    Secondary,
    /// Middle button.
    Middle,
}

/// One normalized input event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// The pointer moved without a pressed button.
    PointerMoved {
        /// Current position.
        position: Point,
    },
    /// A button was pressed.
    PointerPressed {
        /// Position of the press.
        position: Point,
        /// Pressed button.
        button: PointerButton,
    },
    /// A button was released.
    PointerReleased {
        /// Position of the release.
        position: Point,
        /// Released button.
        button: PointerButton,
    },
    /// The pointer moved while a button was held.
    PointerDragged {
        /// Current position.
        position: Point,
        /// Position reported by the previous pointer event.
        previous: Point,
    },
    /// The wheel turned.
    Wheel {
        /// Pointer position when the wheel turned.
        position: Point,
        /// Notch count; positive values mean the wheel turned down (toward the user).
        notches: i32,
    },
    /// The pointer left the window.
    PointerLeft,
    /// A key was pressed.
    Key(KeyEvent),
}

impl InputEvent {
    /// Pointer position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match *self {
            Self::PointerMoved { position }
            | Self::PointerPressed { position, .. }
            | Self::PointerReleased { position, .. }
            | Self::PointerDragged { position, .. }
            | Self::Wheel { position, .. } => Some(position),
            Self::PointerLeft | Self::Key(_) => None,
        }
    }

    /// Movement since the previous pointer event, for drags.
    pub fn drag_movement(&self) -> Option<Vec2> {
        match *self {
            Self::PointerDragged { position, previous } => Some(position - previous),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcut_ignores_produced_char() {
        let copy = KeyEvent::ctrl('C');
        assert!(copy.is_shortcut('c'));
        assert!(!copy.is_shortcut('v'));
        assert_eq!(copy.typed_char(), None);

        let plain = KeyEvent::char('c');
        assert!(!plain.is_shortcut('c'));
        assert_eq!(plain.typed_char(), Some('c'));
    }

    #[test]
    fn drag_movement_is_current_minus_previous() {
        let ev = InputEvent::PointerDragged {
            position: Point::new(15.0, 4.0),
            previous: Point::new(10.0, 10.0),
        };
        assert_eq!(ev.drag_movement(), Some(Vec2::new(5.0, -6.0)));
        assert_eq!(ev.position(), Some(Point::new(15.0, 4.0)));
        assert_eq!(InputEvent::Key(KeyEvent::char('a')).position(), None);
        assert_eq!(InputEvent::PointerLeft.position(), None);
    }
}

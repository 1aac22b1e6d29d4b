//! Input events delivered to a [`Model`](crate::app::Model): [`Msg`],
//! [`Key`], [`MouseAction`], [`ModMask`].

use std::time::Instant;

use crate::geom::Point;

/// A keyboard key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Enter,
    Tab,
    Space,
    Backspace,
    /// A printable character.
    Char(char),
}

/// Bitmask of modifier keys held during an input event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModMask(pub u8);

impl ModMask {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1 << 0);
    pub const CTRL: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);

    /// Whether this mask contains all bits of `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl std::ops::BitOr for ModMask {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// A pointer action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseAction {
    /// Primary (left) button pressed.
    Main,
    /// Secondary (right) button pressed.
    Secondary,
    /// Button released.
    Release,
    /// Pointer moved, with or without a button held.
    Move,
}

/// A message delivered to the application model.
#[derive(Clone, Debug)]
pub enum Msg {
    /// A key was pressed.
    KeyDown {
        key: Key,
        modifiers: ModMask,
        time: Instant,
    },
    /// A pointer event, in screen cells.
    Mouse {
        action: MouseAction,
        pos: Point,
        modifiers: ModMask,
        time: Instant,
    },
    /// The screen was resized.
    Screen {
        width: i32,
        height: i32,
        time: Instant,
    },
    /// A frame previously requested with
    /// [`Effect::RequestFrame`](crate::app::Effect::RequestFrame) is due.
    Frame { time: Instant },
    /// Sent once when the application starts.
    Init,
    /// Request to quit.
    Quit,
}

impl Msg {
    /// A `KeyDown` with no modifiers.
    pub fn key(key: Key) -> Self {
        Self::KeyDown {
            key,
            modifiers: ModMask::NONE,
            time: Instant::now(),
        }
    }

    /// A `Mouse` message with no modifiers.
    pub fn mouse(action: MouseAction, pos: Point) -> Self {
        Self::Mouse {
            action,
            pos,
            modifiers: ModMask::NONE,
            time: Instant::now(),
        }
    }

    /// A `Frame` message stamped now.
    pub fn frame() -> Self {
        Self::Frame {
            time: Instant::now(),
        }
    }
}

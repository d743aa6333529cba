#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! This module defines the events a host delivers to list-selection
//! controls. All events derive `Clone`, `PartialEq`, and `Eq` for use in
//! tests and pattern matching.
//!
//! # Design Notes
//!
//! - Events address elements by [`NodeId`]; the host resolves its own
//!   targets into ids before dispatch.
//! - Key identifiers follow the `KeyboardEvent.key` naming used by browsers
//!   (`"ArrowDown"`, `" "`, `"Enter"`); see [`KeyCode::from_key_name`].
//! - Mouse buttons follow `MouseEvent.button` numbering; see
//!   [`MouseButton::from_dom`].
//! - `KeyEventKind` defaults to `Press` when not available from the host.

use bitflags::bitflags;

use crate::dom::NodeId;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event delivered to the focused control.
    Key(KeyEvent),

    /// A pointer activation on an element.
    Click(ClickEvent),

    /// Focus moved into `target`.
    FocusIn(FocusEvent),

    /// Focus left `target`.
    FocusOut(FocusEvent),
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// Press, repeat, or release.
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// An unmodified key press.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
            kind: KeyEventKind::Press,
        }
    }

    /// Build a key event from a `KeyboardEvent.key` identifier.
    ///
    /// Returns `None` for identifiers no control reacts to.
    #[must_use]
    pub fn from_key_name(name: &str) -> Option<Self> {
        KeyCode::from_key_name(name).map(Self::new)
    }

    /// Set the held modifiers (builder).
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the event kind (builder).
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Space or Enter: the keys that activate a button-like trigger.
    #[must_use]
    pub fn is_activation(&self) -> bool {
        self.code == KeyCode::Enter || self.is_char(' ')
    }

    /// Whether this event should drive interaction (presses and repeats).
    #[must_use]
    pub const fn is_press(&self) -> bool {
        !matches!(self.kind, KeyEventKind::Release)
    }

    /// No command modifier is held. Shift alone still counts as plain.
    ///
    /// Chords like Ctrl+Home or Alt+ArrowDown belong to the host (browser
    /// shortcuts, assistive technology), not to the control.
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        !self.modifiers.intersects(Modifiers::COMMAND)
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::new(code)
    }
}

/// Keys list-selection controls distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable key. Space is `Char(' ')`.
    Char(char),
    Enter,
    Escape,
    Tab,
    Home,
    End,
    /// `ArrowUp`.
    Up,
    /// `ArrowDown`.
    Down,
    /// `ArrowLeft`.
    Left,
    /// `ArrowRight`.
    Right,
}

impl KeyCode {
    /// Parse a `KeyboardEvent.key` identifier.
    ///
    /// Accepts the legacy IE/Edge aliases (`"Up"`, `"Esc"`, `"Spacebar"`).
    /// Named keys the controls never consume (`"Shift"`, `"F5"`,
    /// `"PageDown"`) yield `None`.
    #[must_use]
    pub fn from_key_name(name: &str) -> Option<Self> {
        let code = match name {
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            "Tab" => Self::Tab,
            "Home" => Self::Home,
            "End" => Self::End,
            "ArrowUp" | "Up" => Self::Up,
            "ArrowDown" | "Down" => Self::Down,
            "ArrowLeft" | "Left" => Self::Left,
            "ArrowRight" | "Right" => Self::Right,
            "Spacebar" => Self::Char(' '),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => return None,
                }
            }
        };
        Some(code)
    }
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Auto-repeat while held (`KeyboardEvent.repeat`).
    Repeat,

    /// Key was released (`keyup`).
    Release,
}

bitflags! {
    /// Modifier keys held during a key event, named after the
    /// `KeyboardEvent` `*Key` properties.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// `shiftKey`.
        const SHIFT = 0b0001;
        /// `altKey` (Option on macOS).
        const ALT   = 0b0010;
        /// `ctrlKey`.
        const CTRL  = 0b0100;
        /// `metaKey` (Command on macOS, Windows key elsewhere).
        const META  = 0b1000;
        /// Modifiers that turn a key into a host shortcut.
        const COMMAND = Self::ALT.bits() | Self::CTRL.bits() | Self::META.bits();
    }
}

impl Modifiers {
    /// Collect modifiers from the `KeyboardEvent` boolean properties.
    #[must_use]
    pub fn from_dom(shift: bool, alt: bool, ctrl: bool, meta: bool) -> Self {
        let mut mods = Self::empty();
        mods.set(Self::SHIFT, shift);
        mods.set(Self::ALT, alt);
        mods.set(Self::CTRL, ctrl);
        mods.set(Self::META, meta);
        mods
    }
}

/// Pointer button, numbered as `MouseEvent.button`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    /// Button 0: usually left.
    #[default]
    Primary,
    /// Button 1: usually the wheel.
    Auxiliary,
    /// Button 2: usually right (context menu).
    Secondary,
}

impl MouseButton {
    /// Map a `MouseEvent.button` value. Back/forward buttons (3, 4) and
    /// unknown values yield `None`.
    #[must_use]
    pub const fn from_dom(button: i16) -> Option<Self> {
        match button {
            0 => Some(Self::Primary),
            1 => Some(Self::Auxiliary),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// A pointer activation on an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    /// The innermost element under the pointer.
    pub target: NodeId,

    pub button: MouseButton,
}

impl ClickEvent {
    /// A primary-button click on `target`.
    #[must_use]
    pub const fn new(target: NodeId) -> Self {
        Self {
            target,
            button: MouseButton::Primary,
        }
    }

    /// Set the button (builder).
    #[must_use]
    pub const fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    /// Only primary clicks activate controls.
    #[must_use]
    pub const fn is_primary(&self) -> bool {
        matches!(self.button, MouseButton::Primary)
    }
}

/// A focus transition.
///
/// `related_target` is the element on the other side of the transition
/// (receiving focus for focus-out, losing it for focus-in). `None` means
/// focus moved to or from outside the document, e.g. browser chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusEvent {
    /// The element the event is dispatched to.
    pub target: NodeId,

    /// The element on the other side of the transition, if any.
    pub related_target: Option<NodeId>,
}

impl FocusEvent {
    #[must_use]
    pub const fn new(target: NodeId, related_target: Option<NodeId>) -> Self {
        Self {
            target,
            related_target,
        }
    }
}

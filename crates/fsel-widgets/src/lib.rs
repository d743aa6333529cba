#![forbid(unsafe_code)]

//! List-selection controls for fsel.
//!
//! - [`listbox::Listbox`]: ordered options with a single active index,
//!   keyboard/pointer navigation, and `aria-activedescendant` wiring.
//! - [`select::Select`]: a trigger plus a popped-up [`listbox::Listbox`] with
//!   open/closed state and light dismiss.
//! - [`option::ListOption`]: per-option flag record owned by its listbox.
//!
//! Controls are plain state machines. Hosts deliver
//! [`Event`](fsel_core::event::Event)s, pass a
//! [`Surface`](fsel_core::surface::Surface) to write through, and translate
//! [`EventResult::handled`] into their own default suppression.

pub mod aria;
pub mod decoration;
pub mod listbox;
pub mod option;
pub mod select;

pub use decoration::{DecorationSlots, HasDecorationSlots};
pub use listbox::Listbox;
pub use option::{ListOption, OptionClass, OptionFlags, TabStop};
pub use select::{Select, SelectParts, SelectState};

/// Where to move the active option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// First option.
    First,
    /// Last option.
    Last,
    /// One step back, clamped at the first option.
    Previous,
    /// One step forward, clamped at the last option.
    Next,
}

impl Direction {
    /// Target index when moving from `current` in a list of `len` options.
    ///
    /// Returns `None` when `len == 0`. No wraparound.
    #[must_use]
    pub fn target(self, current: usize, len: usize) -> Option<usize> {
        let last = len.checked_sub(1)?;
        let current = current.min(last);
        Some(match self {
            Self::First => 0,
            Self::Last => last,
            Self::Previous => current.saturating_sub(1),
            Self::Next => (current + 1).min(last),
        })
    }
}

/// What a handled event asked the listbox to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationCommand {
    /// Move the active option.
    Move(Direction),
    /// Commit the active option as the output value.
    Commit,
}

/// Outcome of handling one event.
///
/// `handled` means the host should suppress its default processing of the
/// event (scrolling, native activation, propagation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventResult {
    /// Suppress the host's default handling.
    pub handled: bool,
    /// Navigation the event mapped to, if any.
    pub action: Option<NavigationCommand>,
}

impl EventResult {
    /// The event was not consumed.
    pub const IGNORED: Self = Self {
        handled: false,
        action: None,
    };

    /// The event was consumed without a navigation command.
    pub const HANDLED: Self = Self {
        handled: true,
        action: None,
    };

    /// The event was consumed and mapped to `action`.
    #[must_use]
    pub const fn command(action: NavigationCommand) -> Self {
        Self {
            handled: true,
            action: Some(action),
        }
    }

    /// Combine two results for the same event: handled if either was, and the
    /// later action wins when both carry one.
    #[must_use]
    pub fn merge(self, later: Self) -> Self {
        Self {
            handled: self.handled || later.handled,
            action: later.action.or(self.action),
        }
    }
}

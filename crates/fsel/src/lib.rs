#![forbid(unsafe_code)]

//! fsel public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from the member crates and offers a lightweight
//! prelude for day-to-day usage.

use std::fmt;

pub mod scaffold;

// --- Core re-exports -------------------------------------------------------

pub use fsel_core::dom::{DomError, ElementTree, NodeId};
pub use fsel_core::event::{
    ClickEvent, Event, FocusEvent, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton,
};
pub use fsel_core::lifecycle::Lifecycle;
pub use fsel_core::surface::Surface;

// --- Widget re-exports -----------------------------------------------------

pub use fsel_widgets::{
    DecorationSlots, Direction, EventResult, HasDecorationSlots, ListOption, Listbox,
    NavigationCommand, OptionClass, OptionFlags, Select, SelectParts, SelectState, TabStop,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for fsel embedders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Element tree misuse (unknown node, cyclic append).
    Dom(DomError),
    /// A control was given no options to bind.
    NoOptions,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dom(err) => write!(f, "{err}"),
            Self::NoOptions => write!(f, "select requires at least one option"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Dom(err) => Some(err),
            Self::NoOptions => None,
        }
    }
}

impl From<DomError> for Error {
    fn from(err: DomError) -> Self {
        Self::Dom(err)
    }
}

/// Standard result type for fsel APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::scaffold::SelectScaffold;
    pub use crate::{
        ElementTree, Error, Event, EventResult, HasDecorationSlots, KeyCode, KeyEvent, Listbox,
        NodeId, Result, Select, SelectParts, Surface,
    };

    pub use crate::{core, widgets};
}

pub use fsel_core as core;
pub use fsel_widgets as widgets;

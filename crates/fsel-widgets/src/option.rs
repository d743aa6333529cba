#![forbid(unsafe_code)]

//! Option entity.
//!
//! A [`ListOption`] is the flag record a [`Listbox`](crate::listbox::Listbox)
//! keeps for one `role="option"` element. The element itself belongs to the
//! host; the record is created when the listbox populates and is written
//! only by that listbox.

use bitflags::bitflags;
use fsel_core::dom::NodeId;
use fsel_core::surface::Surface;

use crate::aria;

bitflags! {
    /// Per-option state flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct OptionFlags: u8 {
        /// The option is the active one of its listbox.
        const SELECTED  = 0b001;
        /// Interaction is disabled.
        const DISABLED  = 0b010;
        /// Value cannot be changed by the user.
        const READ_ONLY = 0b100;
    }
}

/// Tab-order participation of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabStop {
    /// In the tab order (`tabindex="0"`).
    Stop,
    /// Focusable by script but skipped by Tab (`tabindex="-1"`).
    Removed,
    /// Not focusable at all (no `tabindex`).
    Unreachable,
}

impl TabStop {
    /// The `tabindex` attribute value, or `None` to remove it.
    #[must_use]
    pub const fn tabindex(self) -> Option<&'static str> {
        match self {
            Self::Stop => Some("0"),
            Self::Removed => Some("-1"),
            Self::Unreachable => None,
        }
    }
}

/// Display classification consumed by the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionClass {
    /// Neither selected nor disabled.
    Plain,
    /// The active option.
    Selected,
    /// Disabled (takes precedence over `Selected`).
    Disabled,
}

impl OptionClass {
    /// Class attribute value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Selected => "selected",
            Self::Disabled => "disabled",
        }
    }
}

/// One selectable item of a listbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOption {
    node: NodeId,
    id: String,
    text: String,
    flags: OptionFlags,
}

impl ListOption {
    pub(crate) fn new(node: NodeId, id: String, text: String) -> Self {
        Self {
            node,
            id,
            text,
            flags: OptionFlags::empty(),
        }
    }

    /// The host element.
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// Stable positional id (`option-<index>` by default).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display text, also the committed value.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current flags.
    #[must_use]
    pub const fn flags(&self) -> OptionFlags {
        self.flags
    }

    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.flags.contains(OptionFlags::SELECTED)
    }

    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.flags.contains(OptionFlags::DISABLED)
    }

    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.flags.contains(OptionFlags::READ_ONLY)
    }

    /// Tab-order participation, derived from the flags.
    #[must_use]
    pub const fn tab_stop(&self) -> TabStop {
        if self.is_disabled() {
            TabStop::Unreachable
        } else if self.is_selected() {
            TabStop::Stop
        } else {
            TabStop::Removed
        }
    }

    /// Display classification, derived from the flags.
    #[must_use]
    pub const fn class(&self) -> OptionClass {
        if self.is_disabled() {
            OptionClass::Disabled
        } else if self.is_selected() {
            OptionClass::Selected
        } else {
            OptionClass::Plain
        }
    }

    pub(crate) fn set_flag(&mut self, flag: OptionFlags, on: bool) {
        self.flags.set(flag, on);
    }

    /// Clear the selection state of an element that is no longer an option
    /// of the listbox. The element keeps its `id`.
    pub(crate) fn release<S: Surface + ?Sized>(surface: &mut S, node: NodeId) {
        surface.set_bool_attribute(node, aria::ARIA_SELECTED, false);
        surface.remove_attribute(node, aria::TABINDEX);
        surface.set_attribute(node, aria::CLASS, OptionClass::Plain.as_str());
    }

    /// Write this option's attributes to the surface.
    pub(crate) fn project<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.set_attribute(self.node, aria::ID, &self.id);
        surface.set_bool_attribute(self.node, aria::ARIA_SELECTED, self.is_selected());
        match self.tab_stop().tabindex() {
            Some(value) => surface.set_attribute(self.node, aria::TABINDEX, value),
            None => surface.remove_attribute(self.node, aria::TABINDEX),
        }
        surface.set_attribute(self.node, aria::CLASS, self.class().as_str());
    }
}

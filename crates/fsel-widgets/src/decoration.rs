#![forbid(unsafe_code)]

//! Start/end decoration slots.
//!
//! Controls with a trigger can carry optional content before and after the
//! trigger's label (icons, prefixes, units). The capability is expressed as
//! the [`HasDecorationSlots`] trait so any control can opt in by exposing a
//! [`DecorationSlots`] value.

use fsel_core::dom::NodeId;
use fsel_core::surface::Surface;

use crate::aria;

/// Marker attribute set on the decorated element while start content exists.
pub const START: &str = "start";
/// Marker attribute set on the decorated element while end content exists.
pub const END: &str = "end";

/// Decoration content assigned to a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecorationSlots {
    /// Content rendered before the label.
    pub start: Option<NodeId>,
    /// Content rendered after the label.
    pub end: Option<NodeId>,
}

impl DecorationSlots {
    /// Whether any decoration is assigned.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Assign content to its slots and mark `host` with `start`/`end`.
    pub fn project<S: Surface + ?Sized>(&self, surface: &mut S, host: NodeId) {
        if let Some(start) = self.start {
            surface.set_attribute(start, aria::SLOT, START);
        }
        if let Some(end) = self.end {
            surface.set_attribute(end, aria::SLOT, END);
        }
        surface.toggle_attribute(host, START, self.start.is_some());
        surface.toggle_attribute(host, END, self.end.is_some());
    }
}

/// Capability: the control carries start/end decoration slots.
pub trait HasDecorationSlots {
    /// The control's slots.
    fn decoration_slots(&self) -> &DecorationSlots;

    /// Mutable access to the control's slots.
    fn decoration_slots_mut(&mut self) -> &mut DecorationSlots;

    fn start_decoration(&self) -> Option<NodeId> {
        self.decoration_slots().start
    }

    fn end_decoration(&self) -> Option<NodeId> {
        self.decoration_slots().end
    }

    fn set_start_decoration(&mut self, content: Option<NodeId>) {
        self.decoration_slots_mut().start = content;
    }

    fn set_end_decoration(&mut self, content: Option<NodeId>) {
        self.decoration_slots_mut().end = content;
    }
}

#![forbid(unsafe_code)]

//! Attachment state of a control.

/// Whether a control is bound to its rendering surface.
///
/// Operations that touch the surface (attribute projection, focus transfer)
/// run only while `Attached`; state changes made while `Detached` are
/// projected in full on the next attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lifecycle {
    /// Not yet bound, or unbound. No surface writes.
    #[default]
    Detached,
    /// Bound to its elements.
    Attached,
}

impl Lifecycle {
    /// Whether surface writes are allowed.
    #[must_use]
    pub const fn is_attached(self) -> bool {
        matches!(self, Self::Attached)
    }
}

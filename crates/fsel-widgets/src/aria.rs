#![forbid(unsafe_code)]

//! Attribute names and values of the accessibility contract.
//!
//! Listbox root: `role="listbox"`, `aria-activedescendant` (absent when no
//! option is active), `aria-disabled`, `aria-readonly`.
//!
//! Option: `role="option"`, `id`, `aria-selected`, `tabindex` (`0` on the
//! active enabled option, `-1` on other enabled options, absent when
//! disabled).
//!
//! Trigger: `role="button"`, `tabindex="0"`, `aria-haspopup="listbox"`,
//! `aria-expanded`.

pub const ROLE: &str = "role";
pub const ROLE_LISTBOX: &str = "listbox";
pub const ROLE_OPTION: &str = "option";
pub const ROLE_BUTTON: &str = "button";

pub const ID: &str = "id";
pub const CLASS: &str = "class";
pub const TABINDEX: &str = "tabindex";
pub const HIDDEN: &str = "hidden";
pub const SLOT: &str = "slot";

pub const ARIA_ACTIVEDESCENDANT: &str = "aria-activedescendant";
pub const ARIA_DISABLED: &str = "aria-disabled";
pub const ARIA_READONLY: &str = "aria-readonly";
pub const ARIA_SELECTED: &str = "aria-selected";
pub const ARIA_EXPANDED: &str = "aria-expanded";
pub const ARIA_HASPOPUP: &str = "aria-haspopup";

/// Host attribute mirroring the open state.
pub const OPEN: &str = "open";
/// Host attribute carrying the displayed label.
pub const LABEL: &str = "label";
/// Proxy attribute carrying the committed value.
pub const VALUE: &str = "value";

#![forbid(unsafe_code)]

//! Select: a button-like trigger plus a popped-up [`Listbox`].
//!
//! The select owns the open/closed state, forwards navigation keys to its
//! listbox, closes on focus loss outside its subtree (light dismiss), and
//! reflects the committed option back onto the trigger and an optional
//! host-form proxy.
//!
//! # State machine
//!
//! ```text
//!            toggle | Space/Enter | trigger click
//!   Closed ───────────────────────────────────────▶ Open
//!     ▲                                               │
//!     └───────────────────────────────────────────────┘
//!      toggle | Space/Enter | Escape | focus lost outside | option click
//! ```
//!
//! There is no terminal state.
//!
//! # Keyboard
//!
//! | Key          | Closed                          | Open                              |
//! |--------------|---------------------------------|-----------------------------------|
//! | Space        | open, step to next option       | close                             |
//! | Enter        | open, step to next option       | commit active option, close       |
//! | Escape       | ignored                         | close                             |
//! | Arrows/Home/End | ignored                      | forwarded to the listbox          |

use fsel_core::dom::NodeId;
use fsel_core::event::{Event, KeyCode, KeyEvent};
use fsel_core::lifecycle::Lifecycle;
use fsel_core::surface::Surface;

use crate::decoration::{DecorationSlots, HasDecorationSlots};
use crate::listbox::Listbox;
use crate::{Direction, EventResult, NavigationCommand, aria};

const DEFAULT_PLACEHOLDER: &str = "Choose one...";

/// Elements a [`Select`] binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectParts {
    /// The select element; its subtree bounds light dismiss.
    pub host: NodeId,
    /// The button-like trigger.
    pub trigger: NodeId,
    /// The popped-up listbox element.
    pub listbox: NodeId,
    /// Element displaying the committed value inside the trigger.
    pub selected_value: Option<NodeId>,
    /// Host-form proxy mirroring the committed value.
    pub proxy: Option<NodeId>,
}

impl SelectParts {
    /// Parts without a value display or proxy.
    #[must_use]
    pub const fn new(host: NodeId, trigger: NodeId, listbox: NodeId) -> Self {
        Self {
            host,
            trigger,
            listbox,
            selected_value: None,
            proxy: None,
        }
    }

    /// Set the value display element (builder).
    #[must_use]
    pub const fn with_selected_value(mut self, node: NodeId) -> Self {
        self.selected_value = Some(node);
        self
    }

    /// Set the host-form proxy element (builder).
    #[must_use]
    pub const fn with_proxy(mut self, node: NodeId) -> Self {
        self.proxy = Some(node);
        self
    }
}

/// Open/closed state of a [`Select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectState {
    /// Popup hidden.
    #[default]
    Closed,
    /// Popup shown and focus-eligible.
    Open,
}

/// Select state machine.
#[derive(Debug, Clone)]
pub struct Select {
    lifecycle: Lifecycle,
    parts: Option<SelectParts>,
    listbox: Listbox,
    open: bool,
    value: String,
    placeholder: String,
    disabled: bool,
    read_only: bool,
    decorations: DecorationSlots,
}

impl Default for Select {
    fn default() -> Self {
        Self::new()
    }
}

impl Select {
    /// Create a closed, detached select with an empty listbox.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lifecycle: Lifecycle::Detached,
            parts: None,
            listbox: Listbox::new(),
            open: false,
            value: String::new(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            disabled: false,
            read_only: false,
            decorations: DecorationSlots::default(),
        }
    }

    /// Label shown while no value is committed (builder).
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Use a preconfigured listbox (builder).
    #[must_use]
    pub fn with_listbox(mut self, listbox: Listbox) -> Self {
        self.listbox = listbox;
        self
    }

    /// Start disabled (builder).
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Start read-only (builder).
    #[must_use]
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    // --- Lifecycle ---

    /// Bind to the rendered parts and project the full state.
    ///
    /// The trigger receives `role="button"`, `tabindex="0"`,
    /// `aria-haspopup="listbox"`, and `aria-expanded`.
    pub fn attach<S: Surface + ?Sized>(&mut self, surface: &mut S, parts: SelectParts) {
        self.lifecycle = Lifecycle::Attached;
        self.parts = Some(parts);
        surface.set_attribute(parts.trigger, aria::ROLE, aria::ROLE_BUTTON);
        surface.set_attribute(parts.trigger, aria::TABINDEX, "0");
        surface.set_attribute(parts.trigger, aria::ARIA_HASPOPUP, aria::ROLE_LISTBOX);
        self.listbox.set_disabled(surface, self.disabled);
        self.listbox.set_read_only(surface, self.read_only);
        self.listbox.attach(surface, parts.listbox);
        self.project_open(surface);
        self.project_value(surface);
        self.project_read_only(surface);
        self.decorations.project(surface, parts.trigger);
        fsel_core::debug!(host = %parts.host, "select attached");
    }

    /// Unbind the select and its listbox.
    pub fn detach(&mut self) {
        self.lifecycle = Lifecycle::Detached;
        self.parts = None;
        self.listbox.detach();
    }

    #[must_use]
    pub const fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    #[must_use]
    pub const fn parts(&self) -> Option<SelectParts> {
        self.parts
    }

    // --- State Access ---

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub const fn state(&self) -> SelectState {
        if self.open {
            SelectState::Open
        } else {
            SelectState::Closed
        }
    }

    /// The committed value; empty until something is committed.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Text the trigger shows: the value, or the placeholder when empty.
    #[must_use]
    pub fn display_label(&self) -> &str {
        if self.value.is_empty() {
            &self.placeholder
        } else {
            &self.value
        }
    }

    /// The wrapped listbox.
    #[must_use]
    pub const fn listbox(&self) -> &Listbox {
        &self.listbox
    }

    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.read_only
    }

    const fn is_interactive(&self) -> bool {
        !self.disabled && !self.read_only
    }

    // --- Configuration at runtime ---

    /// Repopulate the listbox from candidate option elements.
    pub fn set_options<S: Surface + ?Sized>(&mut self, surface: &mut S, candidates: &[NodeId]) {
        self.listbox.set_items(surface, candidates);
    }

    /// Disable user interaction, cascading to the listbox. Disabling an open
    /// select closes it.
    pub fn set_disabled<S: Surface + ?Sized>(&mut self, surface: &mut S, disabled: bool) {
        if self.disabled == disabled {
            return;
        }
        self.disabled = disabled;
        if disabled {
            self.set_open(surface, false);
        }
        self.listbox.set_disabled(surface, disabled);
    }

    /// Block value changes, cascading to the listbox. A read-only select
    /// cannot be opened by the user.
    pub fn set_read_only<S: Surface + ?Sized>(&mut self, surface: &mut S, read_only: bool) {
        if self.read_only == read_only {
            return;
        }
        self.read_only = read_only;
        if read_only {
            self.set_open(surface, false);
        }
        self.listbox.set_read_only(surface, read_only);
        self.project_read_only(surface);
    }

    /// Re-project decoration slots after changing them.
    pub fn refresh_decorations<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        if let Some(parts) = self.attached_parts() {
            self.decorations.project(surface, parts.trigger);
        }
    }

    // --- Open / Close ---

    /// Flip the open state. Opening moves focus into the listbox.
    ///
    /// Returns the new open state.
    pub fn toggle_open<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        let open = !self.open;
        self.set_open(surface, open);
        open
    }

    /// Close the popup if open.
    pub fn close<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.set_open(surface, false);
    }

    // --- Value ---

    /// Set the committed value and mirror it to the display and proxy.
    pub fn commit_value<S: Surface + ?Sized>(&mut self, surface: &mut S, text: impl Into<String>) {
        self.value = text.into();
        fsel_core::debug!(value = %self.value, "select value committed");
        self.project_value(surface);
    }

    // --- Event Handling ---

    /// Key pressed while focus is on the control.
    ///
    /// Space/Enter toggle the popup. The keystroke that opens it also steps
    /// the listbox to its next option; the keystroke that closes it is
    /// forwarded, so Enter commits the active option. While open, every other
    /// key goes to the listbox after local handling (Escape closes).
    pub fn handle_trigger_key<S: Surface + ?Sized>(&mut self, surface: &mut S, key: &KeyEvent) -> EventResult {
        if !key.is_press() || !key.is_plain() {
            return EventResult::IGNORED;
        }
        let was_open = self.open;

        if key.is_activation() {
            if !was_open && !self.is_interactive() {
                fsel_core::trace!("select activation ignored: not interactive");
                return EventResult::IGNORED;
            }
            self.set_open(surface, !was_open);
            if was_open {
                let forwarded = self.forward_key(surface, key);
                return EventResult::HANDLED.merge(forwarded);
            }
            let step = NavigationCommand::Move(Direction::Next);
            self.listbox.apply(surface, step);
            return EventResult::command(step);
        }

        if !was_open {
            return EventResult::IGNORED;
        }
        if key.code == KeyCode::Escape {
            self.set_open(surface, false);
            return EventResult::HANDLED;
        }
        self.forward_key(surface, key)
    }

    /// Pointer activation of the trigger.
    pub fn handle_trigger_click<S: Surface + ?Sized>(&mut self, surface: &mut S) -> EventResult {
        if !self.is_interactive() {
            return EventResult::IGNORED;
        }
        self.toggle_open(surface);
        EventResult::HANDLED
    }

    /// Pointer activation inside the popup: commit the clicked option and
    /// close.
    pub fn handle_listbox_click<S: Surface + ?Sized>(&mut self, surface: &mut S, target: NodeId) -> EventResult {
        if !self.open {
            return EventResult::IGNORED;
        }
        let Some(index) = surface
            .closest_with_role(target, aria::ROLE_OPTION)
            .and_then(|node| self.listbox.index_of(node))
        else {
            return EventResult::IGNORED;
        };
        self.listbox.activate_from_pointer(surface, target);
        if self.listbox.active_index() != Some(index) || self.listbox.commit_active().is_none() {
            return EventResult::IGNORED;
        }
        self.commit_from_listbox(surface);
        self.set_open(surface, false);
        EventResult::command(NavigationCommand::Commit)
    }

    /// Focus left an element of the control (light dismiss).
    ///
    /// Closes unless `related_target` is a proper descendant of the host.
    pub fn handle_focus_out<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        related_target: Option<NodeId>,
    ) -> EventResult {
        let inside = match (self.parts, related_target) {
            (Some(parts), Some(node)) => node != parts.host && surface.contains(parts.host, node),
            _ => false,
        };
        if inside {
            return EventResult::IGNORED;
        }
        if self.open {
            fsel_core::debug!(related = ?related_target, "select light dismiss");
        }
        self.set_open(surface, false);
        EventResult::HANDLED
    }

    /// Focus left an element of the popup.
    ///
    /// Closes only while open and only if focus went outside the listbox.
    /// Without a bound listbox the event is ignored.
    pub fn handle_listbox_focus_out<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        related_target: Option<NodeId>,
    ) -> EventResult {
        let Some(root) = self.listbox.root() else {
            return EventResult::IGNORED;
        };
        if self.open && related_target.is_none_or(|node| !surface.contains(root, node)) {
            self.set_open(surface, false);
        }
        EventResult::IGNORED
    }

    /// Route a canonical event delivered to the host element.
    pub fn handle_event<S: Surface + ?Sized>(&mut self, surface: &mut S, event: &Event) -> EventResult {
        let span = fsel_core::debug_span!("select_event", open = self.open);
        let _guard = span.enter();

        match event {
            Event::Key(key) => self.handle_trigger_key(surface, key),
            Event::Click(click) => {
                let Some(parts) = self.parts.filter(|_| click.is_primary()) else {
                    return EventResult::IGNORED;
                };
                if surface.contains(parts.trigger, click.target) {
                    self.handle_trigger_click(surface)
                } else if surface.contains(parts.listbox, click.target) {
                    self.handle_listbox_click(surface, click.target)
                } else {
                    EventResult::IGNORED
                }
            }
            Event::FocusOut(focus) => {
                let within_listbox = self
                    .listbox
                    .root()
                    .is_some_and(|root| surface.contains(root, focus.target));
                let listbox = if within_listbox {
                    self.listbox.handle_focus_out(surface, focus.related_target)
                } else {
                    EventResult::IGNORED
                };
                listbox.merge(self.handle_focus_out(surface, focus.related_target))
            }
            Event::FocusIn(_) => EventResult::IGNORED,
        }
    }

    // --- Internal ---

    /// The single writer of `open`.
    fn set_open<S: Surface + ?Sized>(&mut self, surface: &mut S, open: bool) {
        if self.open == open {
            return;
        }
        self.open = open;
        fsel_core::debug!(open, "select open state changed");
        self.project_open(surface);
        // Focus eligibility is state, tracked even while detached.
        if open {
            self.listbox.focus(surface);
        }
    }

    fn forward_key<S: Surface + ?Sized>(&mut self, surface: &mut S, key: &KeyEvent) -> EventResult {
        let forwarded = self.listbox.handle_key(surface, key);
        if forwarded.action == Some(NavigationCommand::Commit) {
            self.commit_from_listbox(surface);
        }
        forwarded
    }

    fn commit_from_listbox<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        if let Some(text) = self.listbox.committed_value().map(str::to_string) {
            self.commit_value(surface, text);
        }
    }

    const fn attached_parts(&self) -> Option<SelectParts> {
        if self.lifecycle.is_attached() {
            self.parts
        } else {
            None
        }
    }

    fn project_open<S: Surface + ?Sized>(&self, surface: &mut S) {
        let Some(parts) = self.attached_parts() else {
            return;
        };
        surface.set_bool_attribute(parts.trigger, aria::ARIA_EXPANDED, self.open);
        surface.toggle_attribute(parts.listbox, aria::HIDDEN, !self.open);
        surface.toggle_attribute(parts.host, aria::OPEN, self.open);
    }

    fn project_value<S: Surface + ?Sized>(&self, surface: &mut S) {
        let Some(parts) = self.attached_parts() else {
            return;
        };
        surface.set_attribute(parts.host, aria::LABEL, self.display_label());
        if let Some(display) = parts.selected_value {
            surface.set_text_content(display, self.display_label());
        }
        if let Some(proxy) = parts.proxy {
            surface.set_attribute(proxy, aria::VALUE, &self.value);
        }
    }

    fn project_read_only<S: Surface + ?Sized>(&self, surface: &mut S) {
        let Some(parts) = self.attached_parts() else {
            return;
        };
        let class = if self.read_only { "readonly" } else { "" };
        surface.set_attribute(parts.host, aria::CLASS, class);
    }
}

impl HasDecorationSlots for Select {
    fn decoration_slots(&self) -> &DecorationSlots {
        &self.decorations
    }

    fn decoration_slots_mut(&mut self) -> &mut DecorationSlots {
        &mut self.decorations
    }
}

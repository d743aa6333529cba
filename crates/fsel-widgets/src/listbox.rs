#![forbid(unsafe_code)]

//! Listbox: an ordered set of options with one active option.
//!
//! The listbox tracks which option is active (the keyboard focus target),
//! moves it in response to keys and pointer activation, and exposes the
//! active option's id as `aria-activedescendant`.
//!
//! # Usage
//!
//! ```
//! use fsel_core::dom::ElementTree;
//! use fsel_core::event::{KeyCode, KeyEvent};
//! use fsel_core::surface::Surface;
//! use fsel_widgets::Listbox;
//!
//! let mut tree = ElementTree::new();
//! let root = tree.append_element(tree.root(), "fsel-listbox").unwrap();
//! let mut options = Vec::new();
//! for label in ["Apple", "Banana", "Cherry"] {
//!     let opt = tree.append_element(root, "fsel-option").unwrap();
//!     tree.set_attribute(opt, "role", "option");
//!     tree.set_text_content(opt, label);
//!     options.push(opt);
//! }
//!
//! let mut listbox = Listbox::new();
//! listbox.attach(&mut tree, root);
//! listbox.set_items(&mut tree, &options);
//! let _ = listbox.handle_key(&mut tree, &KeyEvent::new(KeyCode::Down));
//! assert_eq!(listbox.active_index(), Some(1));
//! assert_eq!(tree.attribute(root, "aria-activedescendant"), Some("option-1"));
//! ```
//!
//! # Invariants
//!
//! 1. `active` is `None` iff `items` is empty; otherwise it is `< items.len()`.
//! 2. Exactly the active option has `SELECTED` set.
//! 3. The private `sync` routine is the only writer of option flags and of the
//!    active-descendant projection.

use fsel_core::dom::NodeId;
use fsel_core::event::{Event, KeyCode, KeyEvent};
use fsel_core::lifecycle::Lifecycle;
use fsel_core::surface::Surface;

use crate::option::{ListOption, OptionFlags};
use crate::{Direction, EventResult, NavigationCommand, aria};

const DEFAULT_ID_PREFIX: &str = "option-";

/// How `Listbox::sync` treats an unchanged index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyncMode {
    /// User navigation: skip if unchanged, move input focus otherwise.
    Navigate,
    /// Flag re-initialization: always rewrite, never move focus.
    Resync,
}

/// Listbox state machine.
#[derive(Debug, Clone)]
pub struct Listbox {
    lifecycle: Lifecycle,
    root: Option<NodeId>,
    items: Vec<ListOption>,
    active: Option<usize>,
    committed: Option<usize>,
    disabled: bool,
    read_only: bool,
    focusable: bool,
    id_prefix: String,
}

impl Default for Listbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Listbox {
    /// Create a detached, empty listbox.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lifecycle: Lifecycle::Detached,
            root: None,
            items: Vec::new(),
            active: None,
            committed: None,
            disabled: false,
            read_only: false,
            focusable: false,
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
        }
    }

    /// Set the prefix of generated option ids (builder). Default `"option-"`.
    #[must_use]
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    // --- Lifecycle ---

    /// Bind to the `role="listbox"` element and project the full state.
    pub fn attach<S: Surface + ?Sized>(&mut self, surface: &mut S, root: NodeId) {
        self.lifecycle = Lifecycle::Attached;
        self.root = Some(root);
        surface.set_attribute(root, aria::ROLE, aria::ROLE_LISTBOX);
        self.project(surface);
    }

    /// Unbind. Later state changes are kept but not projected.
    pub fn detach(&mut self) {
        self.lifecycle = Lifecycle::Detached;
        self.root = None;
    }

    #[must_use]
    pub const fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// The bound listbox element.
    #[must_use]
    pub const fn root(&self) -> Option<NodeId> {
        self.root
    }

    // --- State Access ---

    /// Options in document order.
    #[must_use]
    pub fn items(&self) -> &[ListOption] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the active option; `None` while empty.
    #[must_use]
    pub const fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// The active option.
    #[must_use]
    pub fn active_option(&self) -> Option<&ListOption> {
        self.active.and_then(|i| self.items.get(i))
    }

    /// Id of the active option, as exposed through `aria-activedescendant`.
    #[must_use]
    pub fn active_descendant_id(&self) -> Option<&str> {
        self.active_option().map(ListOption::id)
    }

    /// Index of the last option committed with Enter.
    #[must_use]
    pub const fn committed_index(&self) -> Option<usize> {
        self.committed
    }

    /// Text of the last committed option.
    #[must_use]
    pub fn committed_value(&self) -> Option<&str> {
        self.committed
            .and_then(|i| self.items.get(i))
            .map(ListOption::text)
    }

    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Whether the listbox currently accepts focus.
    #[must_use]
    pub const fn is_focusable(&self) -> bool {
        self.focusable
    }

    const fn is_interactive(&self) -> bool {
        !self.disabled && !self.read_only
    }

    // --- Population ---

    /// Repopulate from candidate elements in document order.
    ///
    /// Keeps only enabled elements with `role="option"`, assigns positional
    /// ids, and resets the active index to 0 (or suspends tracking when none
    /// qualify). Every option's flags are re-initialized; input focus is not
    /// moved. Elements dropped from the list lose their selection state and
    /// tab stop.
    pub fn set_items<S: Surface + ?Sized>(&mut self, surface: &mut S, candidates: &[NodeId]) {
        let previous: Vec<NodeId> = self.items.iter().map(ListOption::node).collect();
        self.items = candidates
            .iter()
            .copied()
            .filter(|&node| {
                surface.role(node) == Some(aria::ROLE_OPTION) && !surface.is_disabled(node)
            })
            .enumerate()
            .map(|(i, node)| {
                let text = surface.text_content(node).trim().to_string();
                ListOption::new(node, format!("{}{i}", self.id_prefix), text)
            })
            .collect();
        self.committed = None;
        fsel_core::debug!(
            candidates = candidates.len(),
            items = self.items.len(),
            "listbox populated"
        );
        if self.lifecycle.is_attached() {
            for node in previous.into_iter().filter(|&n| self.index_of(n).is_none()) {
                ListOption::release(surface, node);
            }
        }
        let index = if self.items.is_empty() { None } else { Some(0) };
        self.sync(surface, index, SyncMode::Resync);
    }

    // --- Navigation ---

    /// Move the active option.
    ///
    /// Returns `true` if the active index changed. Empty, disabled, and
    /// read-only listboxes ignore the request.
    pub fn move_active<S: Surface + ?Sized>(&mut self, surface: &mut S, direction: Direction) -> bool {
        if !self.is_interactive() {
            fsel_core::trace!(?direction, "listbox navigation ignored: not interactive");
            return false;
        }
        let Some(target) = self
            .active
            .and_then(|current| direction.target(current, self.items.len()))
        else {
            return false;
        };
        self.sync(surface, Some(target), SyncMode::Navigate)
    }

    /// Activate the option under a pointer event target.
    ///
    /// Resolves the nearest ancestor-or-self with `role="option"`. Returns
    /// `true` if the active index changed.
    pub fn activate_from_pointer<S: Surface + ?Sized>(&mut self, surface: &mut S, target: NodeId) -> bool {
        if !self.is_interactive() {
            return false;
        }
        let Some(option) = surface.closest_with_role(target, aria::ROLE_OPTION) else {
            return false;
        };
        let Some(index) = self.index_of(option) else {
            return false;
        };
        if self.items[index].is_disabled() {
            return false;
        }
        self.sync(surface, Some(index), SyncMode::Navigate)
    }

    /// Commit the active option as the output value.
    pub fn commit_active(&mut self) -> Option<&ListOption> {
        if !self.is_interactive() {
            return None;
        }
        let index = self.active?;
        self.committed = Some(index);
        let option = &self.items[index];
        fsel_core::debug!(index, id = option.id(), "listbox value committed");
        Some(option)
    }

    /// Position of `node` among the items.
    #[must_use]
    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        self.items.iter().position(|item| item.node() == node)
    }

    // --- Event Handling ---

    /// Map a key to the command it triggers, without touching state.
    #[must_use]
    pub const fn command_for_key(code: KeyCode) -> Option<NavigationCommand> {
        match code {
            KeyCode::Up | KeyCode::Left => Some(NavigationCommand::Move(Direction::Previous)),
            KeyCode::Down | KeyCode::Right => Some(NavigationCommand::Move(Direction::Next)),
            KeyCode::Home => Some(NavigationCommand::Move(Direction::First)),
            KeyCode::End => Some(NavigationCommand::Move(Direction::Last)),
            KeyCode::Enter => Some(NavigationCommand::Commit),
            _ => None,
        }
    }

    /// Handle a key press. Unrecognized keys and Ctrl/Alt/Meta chords are
    /// ignored.
    pub fn handle_key<S: Surface + ?Sized>(&mut self, surface: &mut S, key: &KeyEvent) -> EventResult {
        if !key.is_press() {
            return EventResult::IGNORED;
        }
        if !key.is_plain() {
            fsel_core::trace!(code = ?key.code, "listbox key ignored: modified");
            return EventResult::IGNORED;
        }
        let Some(command) = Self::command_for_key(key.code) else {
            return EventResult::IGNORED;
        };
        self.apply(surface, command);
        EventResult::command(command)
    }

    /// Execute a command as if its key had been pressed.
    pub fn apply<S: Surface + ?Sized>(&mut self, surface: &mut S, command: NavigationCommand) {
        match command {
            NavigationCommand::Move(direction) => {
                self.move_active(surface, direction);
            }
            NavigationCommand::Commit => {
                self.commit_active();
            }
        }
    }

    /// Focus left an element of the listbox.
    ///
    /// With no related target focus left the document: the event is handled
    /// and the listbox stops being focusable. Focus moving outside the
    /// listbox also clears `focusable`; moves between options change nothing.
    pub fn handle_focus_out<S: Surface + ?Sized>(
        &mut self,
        surface: &S,
        related_target: Option<NodeId>,
    ) -> EventResult {
        match related_target {
            None => {
                self.focusable = false;
                EventResult::HANDLED
            }
            Some(node) if self.root.is_some_and(|root| surface.contains(root, node)) => {
                EventResult::IGNORED
            }
            Some(_) => {
                self.focusable = false;
                EventResult::IGNORED
            }
        }
    }

    /// The listbox element itself lost focus.
    pub fn handle_blur(&mut self, target: NodeId) {
        if self.root == Some(target) {
            self.focusable = false;
        }
    }

    /// Route a canonical event.
    pub fn handle_event<S: Surface + ?Sized>(&mut self, surface: &mut S, event: &Event) -> EventResult {
        match event {
            Event::Key(key) => self.handle_key(surface, key),
            Event::Click(click) => {
                if click.is_primary() && self.activate_from_pointer(surface, click.target) {
                    EventResult::HANDLED
                } else {
                    EventResult::IGNORED
                }
            }
            Event::FocusOut(focus) => {
                if self.root == Some(focus.target) {
                    self.handle_blur(focus.target);
                }
                self.handle_focus_out(surface, focus.related_target)
            }
            Event::FocusIn(_) => EventResult::IGNORED,
        }
    }

    /// Make the listbox focusable and move input focus to the active option.
    pub fn focus<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.focusable = true;
        if !self.lifecycle.is_attached() {
            return;
        }
        if let Some(option) = self.active_option() {
            surface.focus(option.node());
        }
    }

    // --- Disabled / Read-only ---

    /// Disable or enable the listbox and every option.
    pub fn set_disabled<S: Surface + ?Sized>(&mut self, surface: &mut S, disabled: bool) {
        if self.disabled == disabled {
            return;
        }
        self.disabled = disabled;
        self.sync(surface, self.active, SyncMode::Resync);
    }

    /// Make the listbox and every option read-only, or writable again.
    pub fn set_read_only<S: Surface + ?Sized>(&mut self, surface: &mut S, read_only: bool) {
        if self.read_only == read_only {
            return;
        }
        self.read_only = read_only;
        self.sync(surface, self.active, SyncMode::Resync);
    }

    // --- Internal ---

    /// The single writer of option flags and the active-descendant state.
    ///
    /// Returns `true` if anything was written.
    fn sync<S: Surface + ?Sized>(&mut self, surface: &mut S, index: Option<usize>, mode: SyncMode) -> bool {
        if mode == SyncMode::Navigate && index == self.active {
            return false;
        }
        let index = index.filter(|&i| i < self.items.len());
        for (i, item) in self.items.iter_mut().enumerate() {
            item.set_flag(OptionFlags::SELECTED, Some(i) == index);
            item.set_flag(OptionFlags::DISABLED, self.disabled);
            item.set_flag(OptionFlags::READ_ONLY, self.read_only);
        }
        self.active = index;
        fsel_core::debug!(
            active = ?self.active,
            resync = mode == SyncMode::Resync,
            "listbox active option committed"
        );

        if !self.lifecycle.is_attached() {
            return true;
        }
        self.project(surface);
        if mode == SyncMode::Navigate
            && let Some(option) = self.active_option()
        {
            surface.focus(option.node());
        }
        true
    }

    fn project<S: Surface + ?Sized>(&self, surface: &mut S) {
        for item in &self.items {
            item.project(surface);
        }
        let Some(root) = self.root else {
            return;
        };
        match self.active_descendant_id() {
            Some(id) => surface.set_attribute(root, aria::ARIA_ACTIVEDESCENDANT, id),
            None => surface.remove_attribute(root, aria::ARIA_ACTIVEDESCENDANT),
        }
        surface.set_bool_attribute(root, aria::ARIA_DISABLED, self.disabled);
        surface.set_bool_attribute(root, aria::ARIA_READONLY, self.read_only);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsel_core::dom::ElementTree;
    use fsel_core::event::{ClickEvent, FocusEvent, KeyEventKind};

    struct Fixture {
        tree: ElementTree,
        root: NodeId,
        options: Vec<NodeId>,
        listbox: Listbox,
    }

    fn fixture(labels: &[&str]) -> Fixture {
        let mut tree = ElementTree::new();
        let body = tree.root();
        let root = tree.append_element(body, "fsel-listbox").unwrap();
        let mut options = Vec::new();
        for label in labels {
            let opt = tree.append_element(root, "fsel-option").unwrap();
            tree.set_attribute(opt, "role", "option");
            tree.set_text_content(opt, label);
            options.push(opt);
        }
        let mut listbox = Listbox::new();
        listbox.attach(&mut tree, root);
        listbox.set_items(&mut tree, &options);
        Fixture {
            tree,
            root,
            options,
            listbox,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code)
    }

    fn selected_count(lb: &Listbox) -> usize {
        lb.items().iter().filter(|o| o.is_selected()).count()
    }

    #[test]
    fn population_assigns_positional_ids() {
        let f = fixture(&["A", "B", "C"]);
        let ids: Vec<_> = f.listbox.items().iter().map(|o| o.id().to_string()).collect();
        assert_eq!(ids, vec!["option-0", "option-1", "option-2"]);
        assert_eq!(f.tree.attribute(f.options[2], "id"), Some("option-2"));
    }

    #[test]
    fn population_starts_at_first_option() {
        let f = fixture(&["A", "B"]);
        assert_eq!(f.listbox.active_index(), Some(0));
        assert_eq!(f.listbox.active_descendant_id(), Some("option-0"));
        assert_eq!(f.tree.attribute(f.root, "aria-activedescendant"), Some("option-0"));
        assert_eq!(f.tree.attribute(f.options[0], "tabindex"), Some("0"));
        assert_eq!(f.tree.attribute(f.options[1], "tabindex"), Some("-1"));
    }

    #[test]
    fn population_does_not_steal_focus() {
        let f = fixture(&["A", "B"]);
        assert_eq!(f.tree.focused(), None);
    }

    #[test]
    fn population_skips_disabled_and_non_options() {
        let mut tree = ElementTree::new();
        let body = tree.root();
        let root = tree.append_element(body, "fsel-listbox").unwrap();
        let a = tree.append_element(root, "fsel-option").unwrap();
        tree.set_attribute(a, "role", "option");
        let divider = tree.append_element(root, "hr").unwrap();
        let b = tree.append_element(root, "fsel-option").unwrap();
        tree.set_attribute(b, "role", "option");
        tree.set_attribute(b, "disabled", "");
        let c = tree.append_element(root, "fsel-option").unwrap();
        tree.set_attribute(c, "role", "option");

        let mut lb = Listbox::new();
        lb.attach(&mut tree, root);
        lb.set_items(&mut tree, &[a, divider, b, c]);
        assert_eq!(lb.len(), 2);
        assert_eq!(lb.items()[1].node(), c);
        assert_eq!(lb.items()[1].id(), "option-1");
    }

    #[test]
    fn empty_population_suspends_tracking() {
        let mut f = fixture(&["A", "B"]);
        f.listbox.set_items(&mut f.tree, &[]);
        assert!(f.listbox.is_empty());
        assert_eq!(f.listbox.active_index(), None);
        assert_eq!(f.tree.attribute(f.root, "aria-activedescendant"), None);
        assert!(!f.listbox.move_active(&mut f.tree, Direction::Next));
        assert_eq!(f.listbox.commit_active(), None);
    }

    #[test]
    fn repopulation_resets_to_zero() {
        let mut f = fixture(&["A", "B", "C"]);
        f.listbox.move_active(&mut f.tree, Direction::Last);
        let reordered = vec![f.options[2], f.options[0]];
        f.listbox.set_items(&mut f.tree, &reordered);
        assert_eq!(f.listbox.active_index(), Some(0));
        assert_eq!(selected_count(&f.listbox), 1);
        assert_eq!(f.tree.attribute(f.options[2], "id"), Some("option-0"));
        assert_eq!(f.tree.attribute(f.options[2], "aria-selected"), Some("true"));
    }

    #[test]
    fn repopulation_releases_dropped_options() {
        let mut f = fixture(&["A", "B", "C"]);
        f.listbox.move_active(&mut f.tree, Direction::Last);
        f.tree.set_attribute(f.options[2], "disabled", "");
        let options = f.options.clone();
        f.listbox.set_items(&mut f.tree, &options);

        let stops: Vec<_> = options
            .iter()
            .filter(|&&n| f.tree.attribute(n, "tabindex") == Some("0"))
            .collect();
        let marked: Vec<_> = options
            .iter()
            .filter(|&&n| f.tree.attribute(n, "aria-selected") == Some("true"))
            .collect();
        assert_eq!(stops, vec![&f.options[0]]);
        assert_eq!(marked, vec![&f.options[0]]);
        assert_eq!(f.tree.attribute(f.options[2], "tabindex"), None);
        assert_eq!(f.tree.attribute(f.options[2], "aria-selected"), Some("false"));
        assert_eq!(f.tree.attribute(f.options[2], "class"), Some(""));
    }

    #[test]
    fn emptying_releases_every_option() {
        let mut f = fixture(&["A", "B"]);
        f.listbox.set_items(&mut f.tree, &[]);
        for &node in &f.options {
            assert_eq!(f.tree.attribute(node, "tabindex"), None);
            assert_eq!(f.tree.attribute(node, "aria-selected"), Some("false"));
        }
    }

    #[test]
    fn arrow_down_clamps_at_end() {
        let mut f = fixture(&["A", "B", "C"]);
        let mut seen = vec![f.listbox.active_index().unwrap()];
        for _ in 0..3 {
            let _ = f.listbox.handle_key(&mut f.tree, &key(KeyCode::Down));
            seen.push(f.listbox.active_index().unwrap());
        }
        assert_eq!(seen, vec![0, 1, 2, 2]);
    }

    #[test]
    fn arrow_up_clamps_at_start() {
        let mut f = fixture(&["A", "B", "C"]);
        for _ in 0..4 {
            let _ = f.listbox.handle_key(&mut f.tree, &key(KeyCode::Up));
        }
        assert_eq!(f.listbox.active_index(), Some(0));
    }

    #[test]
    fn left_and_right_mirror_up_and_down() {
        let mut f = fixture(&["A", "B", "C"]);
        let _ = f.listbox.handle_key(&mut f.tree, &key(KeyCode::Right));
        assert_eq!(f.listbox.active_index(), Some(1));
        let _ = f.listbox.handle_key(&mut f.tree, &key(KeyCode::Left));
        assert_eq!(f.listbox.active_index(), Some(0));
    }

    #[test]
    fn home_and_end() {
        let mut f = fixture(&["A", "B", "C", "D", "E"]);
        let _ = f.listbox.handle_key(&mut f.tree, &key(KeyCode::Home));
        assert_eq!(f.listbox.active_index(), Some(0));
        let _ = f.listbox.handle_key(&mut f.tree, &key(KeyCode::End));
        assert_eq!(f.listbox.active_index(), Some(4));
    }

    #[test]
    fn navigation_moves_focus_and_tab_stop() {
        let mut f = fixture(&["A", "B"]);
        f.listbox.move_active(&mut f.tree, Direction::Next);
        assert_eq!(f.tree.focused(), Some(f.options[1]));
        assert_eq!(f.tree.attribute(f.options[1], "tabindex"), Some("0"));
        assert_eq!(f.tree.attribute(f.options[0], "tabindex"), Some("-1"));
        assert_eq!(f.tree.attribute(f.options[0], "aria-selected"), Some("false"));
        assert_eq!(f.tree.attribute(f.options[1], "class"), Some("selected"));
    }

    #[test]
    fn unchanged_index_is_a_noop() {
        let mut f = fixture(&["A", "B"]);
        f.listbox.move_active(&mut f.tree, Direction::Last);
        let writes = f.tree.write_count();
        assert!(!f.listbox.move_active(&mut f.tree, Direction::Last));
        assert!(!f.listbox.move_active(&mut f.tree, Direction::Next));
        assert_eq!(f.tree.write_count(), writes);
    }

    #[test]
    fn unknown_key_is_ignored() {
        let mut f = fixture(&["A", "B"]);
        let result = f.listbox.handle_key(&mut f.tree, &key(KeyCode::Char('x')));
        assert_eq!(result, EventResult::IGNORED);
        assert_eq!(f.listbox.active_index(), Some(0));
    }

    #[test]
    fn command_chords_are_ignored() {
        use fsel_core::event::Modifiers;
        let mut f = fixture(&["A", "B", "C"]);
        for mods in [Modifiers::CTRL, Modifiers::ALT, Modifiers::META] {
            let chord = key(KeyCode::End).with_modifiers(mods);
            assert_eq!(f.listbox.handle_key(&mut f.tree, &chord), EventResult::IGNORED);
        }
        assert_eq!(f.listbox.active_index(), Some(0));

        let shifted = key(KeyCode::Down).with_modifiers(Modifiers::SHIFT);
        assert!(f.listbox.handle_key(&mut f.tree, &shifted).handled);
        assert_eq!(f.listbox.active_index(), Some(1));
    }

    #[test]
    fn key_release_is_ignored() {
        let mut f = fixture(&["A", "B"]);
        let release = key(KeyCode::Down).with_kind(KeyEventKind::Release);
        assert_eq!(f.listbox.handle_key(&mut f.tree, &release), EventResult::IGNORED);
        assert_eq!(f.listbox.active_index(), Some(0));
    }

    #[test]
    fn navigation_keys_are_handled() {
        let mut f = fixture(&["A", "B"]);
        let result = f.listbox.handle_key(&mut f.tree, &key(KeyCode::Down));
        assert!(result.handled);
        assert_eq!(
            result.action,
            Some(NavigationCommand::Move(Direction::Next))
        );
    }

    #[test]
    fn enter_commits_active_option() {
        let mut f = fixture(&["Apple", "Banana"]);
        let _ = f.listbox.handle_key(&mut f.tree, &key(KeyCode::Down));
        let result = f.listbox.handle_key(&mut f.tree, &key(KeyCode::Enter));
        assert_eq!(result.action, Some(NavigationCommand::Commit));
        assert_eq!(f.listbox.committed_index(), Some(1));
        assert_eq!(f.listbox.committed_value(), Some("Banana"));
    }

    #[test]
    fn text_is_trimmed() {
        let f = fixture(&["  Apple \n"]);
        assert_eq!(f.listbox.items()[0].text(), "Apple");
    }

    #[test]
    fn pointer_activation_resolves_nested_target() {
        let mut f = fixture(&["A", "B", "C"]);
        let label = f.tree.append_element(f.options[2], "span").unwrap();
        assert!(f.listbox.activate_from_pointer(&mut f.tree, label));
        assert_eq!(f.listbox.active_index(), Some(2));
        assert_eq!(f.tree.focused(), Some(f.options[2]));
    }

    #[test]
    fn pointer_outside_options_is_ignored() {
        let mut f = fixture(&["A", "B"]);
        assert!(!f.listbox.activate_from_pointer(&mut f.tree, f.root));
        assert_eq!(f.listbox.active_index(), Some(0));
    }

    #[test]
    fn pointer_on_foreign_option_is_ignored() {
        let mut f = fixture(&["A", "B"]);
        let body = f.tree.root();
        let stray = f.tree.append_element(body, "fsel-option").unwrap();
        f.tree.set_attribute(stray, "role", "option");
        assert!(!f.listbox.activate_from_pointer(&mut f.tree, stray));
    }

    #[test]
    fn click_event_routes_to_pointer_activation() {
        let mut f = fixture(&["A", "B"]);
        let click = Event::Click(ClickEvent::new(f.options[1]));
        assert!(f.listbox.handle_event(&mut f.tree, &click).handled);
        assert_eq!(f.listbox.active_index(), Some(1));
    }

    #[test]
    fn secondary_click_does_not_activate() {
        use fsel_core::event::MouseButton;
        let mut f = fixture(&["A", "B"]);
        let click = Event::Click(ClickEvent::new(f.options[1]).with_button(MouseButton::Secondary));
        assert_eq!(f.listbox.handle_event(&mut f.tree, &click), EventResult::IGNORED);
        assert_eq!(f.listbox.active_index(), Some(0));
    }

    #[test]
    fn disabled_cascades_and_blocks_interaction() {
        let mut f = fixture(&["A", "B", "C"]);
        f.listbox.set_disabled(&mut f.tree, true);
        assert!(f.listbox.items().iter().all(ListOption::is_disabled));
        assert_eq!(f.tree.attribute(f.root, "aria-disabled"), Some("true"));
        assert_eq!(f.tree.attribute(f.options[0], "tabindex"), None);

        assert!(!f.listbox.move_active(&mut f.tree, Direction::Next));
        assert!(!f.listbox.activate_from_pointer(&mut f.tree, f.options[2]));
        assert_eq!(f.listbox.commit_active(), None);
        assert_eq!(f.listbox.active_index(), Some(0));
        assert_eq!(selected_count(&f.listbox), 1);

        f.listbox.set_disabled(&mut f.tree, false);
        assert!(f.listbox.items().iter().all(|o| !o.is_disabled()));
        assert_eq!(f.tree.attribute(f.options[0], "tabindex"), Some("0"));
        assert!(f.listbox.move_active(&mut f.tree, Direction::Next));
    }

    #[test]
    fn read_only_cascades_and_blocks_interaction() {
        let mut f = fixture(&["A", "B"]);
        f.listbox.set_read_only(&mut f.tree, true);
        assert!(f.listbox.items().iter().all(ListOption::is_read_only));
        assert_eq!(f.tree.attribute(f.root, "aria-readonly"), Some("true"));
        assert!(!f.listbox.move_active(&mut f.tree, Direction::Next));
        assert!(!f.listbox.activate_from_pointer(&mut f.tree, f.options[1]));
    }

    #[test]
    fn disabled_flag_survives_repopulation() {
        let mut f = fixture(&["A", "B"]);
        f.listbox.set_disabled(&mut f.tree, true);
        let options = f.options.clone();
        f.listbox.set_items(&mut f.tree, &options);
        assert!(f.listbox.items().iter().all(ListOption::is_disabled));
    }

    #[test]
    fn focus_out_without_related_target_is_handled() {
        let mut f = fixture(&["A"]);
        f.listbox.focus(&mut f.tree);
        assert!(f.listbox.is_focusable());
        let result = f.listbox.handle_focus_out(&f.tree, None);
        assert!(result.handled);
        assert!(!f.listbox.is_focusable());
    }

    #[test]
    fn focus_out_within_listbox_keeps_focusable() {
        let mut f = fixture(&["A", "B"]);
        f.listbox.focus(&mut f.tree);
        let result = f.listbox.handle_focus_out(&f.tree, Some(f.options[1]));
        assert!(!result.handled);
        assert!(f.listbox.is_focusable());
    }

    #[test]
    fn focus_out_elsewhere_clears_focusable_without_suppression() {
        let mut f = fixture(&["A"]);
        f.listbox.focus(&mut f.tree);
        let body = f.tree.root();
        let other = f.tree.append_element(body, "input").unwrap();
        let result = f.listbox.handle_focus_out(&f.tree, Some(other));
        assert!(!result.handled);
        assert!(!f.listbox.is_focusable());
    }

    #[test]
    fn blur_on_root_clears_focusable() {
        let mut f = fixture(&["A"]);
        f.listbox.focus(&mut f.tree);
        f.listbox.handle_blur(f.options[0]);
        assert!(f.listbox.is_focusable());
        f.listbox.handle_blur(f.root);
        assert!(!f.listbox.is_focusable());
    }

    #[test]
    fn focus_event_routing() {
        let mut f = fixture(&["A"]);
        f.listbox.focus(&mut f.tree);
        let out = Event::FocusOut(FocusEvent::new(f.options[0], None));
        assert!(f.listbox.handle_event(&mut f.tree, &out).handled);
        assert!(!f.listbox.is_focusable());
    }

    #[test]
    fn focus_moves_input_focus_to_active_option() {
        let mut f = fixture(&["A", "B"]);
        f.listbox.focus(&mut f.tree);
        assert_eq!(f.tree.focused(), Some(f.options[0]));
    }

    #[test]
    fn detached_listbox_tracks_state_without_writes() {
        let mut tree = ElementTree::new();
        let body = tree.root();
        let root = tree.append_element(body, "fsel-listbox").unwrap();
        let opt = tree.append_element(root, "fsel-option").unwrap();
        tree.set_attribute(opt, "role", "option");
        let opt2 = tree.append_element(root, "fsel-option").unwrap();
        tree.set_attribute(opt2, "role", "option");
        let writes = tree.write_count();

        let mut lb = Listbox::new();
        lb.set_items(&mut tree, &[opt, opt2]);
        lb.move_active(&mut tree, Direction::Next);
        lb.focus(&mut tree);
        assert_eq!(lb.active_index(), Some(1));
        assert_eq!(tree.write_count(), writes);

        lb.attach(&mut tree, root);
        assert_eq!(tree.attribute(root, "role"), Some("listbox"));
        assert_eq!(tree.attribute(root, "aria-activedescendant"), Some("option-1"));
        assert_eq!(tree.attribute(opt2, "aria-selected"), Some("true"));
    }

    #[test]
    fn detach_stops_projection() {
        let mut f = fixture(&["A", "B"]);
        f.listbox.detach();
        let writes = f.tree.write_count();
        f.listbox.move_active(&mut f.tree, Direction::Next);
        assert_eq!(f.tree.write_count(), writes);
        assert_eq!(f.listbox.lifecycle(), Lifecycle::Detached);
    }

    #[test]
    fn custom_id_prefix() {
        let mut tree = ElementTree::new();
        let body = tree.root();
        let root = tree.append_element(body, "fsel-listbox").unwrap();
        let opt = tree.append_element(root, "fsel-option").unwrap();
        tree.set_attribute(opt, "role", "option");
        let mut lb = Listbox::new().with_id_prefix("fruit-");
        lb.attach(&mut tree, root);
        lb.set_items(&mut tree, &[opt]);
        assert_eq!(tree.attribute(opt, "id"), Some("fruit-0"));
    }

    #[test]
    fn command_for_key_table() {
        use NavigationCommand::{Commit, Move};
        assert_eq!(Listbox::command_for_key(KeyCode::Up), Some(Move(Direction::Previous)));
        assert_eq!(Listbox::command_for_key(KeyCode::Left), Some(Move(Direction::Previous)));
        assert_eq!(Listbox::command_for_key(KeyCode::Down), Some(Move(Direction::Next)));
        assert_eq!(Listbox::command_for_key(KeyCode::Right), Some(Move(Direction::Next)));
        assert_eq!(Listbox::command_for_key(KeyCode::Home), Some(Move(Direction::First)));
        assert_eq!(Listbox::command_for_key(KeyCode::End), Some(Move(Direction::Last)));
        assert_eq!(Listbox::command_for_key(KeyCode::Enter), Some(Commit));
        assert_eq!(Listbox::command_for_key(KeyCode::Tab), None);
        assert_eq!(Listbox::command_for_key(KeyCode::Char(' ')), None);
    }
}

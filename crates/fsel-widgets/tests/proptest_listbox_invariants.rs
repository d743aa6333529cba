//! Property-based invariant tests for listbox and select.
//!
//! 1. The active index stays in range under arbitrary key sequences.
//! 2. Exactly one option carries the selected flag and the tab stop.
//! 3. `aria-activedescendant` always names the active option.
//! 4. Re-applying an unchanged index writes nothing.
//! 5. Disabled listboxes ignore navigation and cascade the flag.
//! 6. Select open state follows a simple model of its inputs.

use fsel_core::dom::{ElementTree, NodeId};
use fsel_core::event::{KeyCode, KeyEvent};
use fsel_core::surface::Surface;
use fsel_widgets::{Direction, Listbox, OptionClass, Select, SelectParts, TabStop};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn key_strategy() -> impl Strategy<Value = KeyCode> {
    prop_oneof![
        Just(KeyCode::Up),
        Just(KeyCode::Down),
        Just(KeyCode::Left),
        Just(KeyCode::Right),
        Just(KeyCode::Home),
        Just(KeyCode::End),
        Just(KeyCode::Enter),
        Just(KeyCode::Tab),
        Just(KeyCode::Char('a')),
    ]
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::First),
        Just(Direction::Last),
        Just(Direction::Previous),
        Just(Direction::Next),
    ]
}

fn listbox_with(len: usize) -> (ElementTree, NodeId, Listbox) {
    let mut tree = ElementTree::new();
    let body = tree.root();
    let root = tree.append_element(body, "fsel-listbox").unwrap();
    let mut options = Vec::with_capacity(len);
    for i in 0..len {
        let opt = tree.append_element(root, "fsel-option").unwrap();
        tree.set_attribute(opt, "role", "option");
        tree.set_text_content(opt, &format!("Item {i}"));
        options.push(opt);
    }
    let mut listbox = Listbox::new();
    listbox.attach(&mut tree, root);
    listbox.set_items(&mut tree, &options);
    (tree, root, listbox)
}

/// Reference model: where the active index should be after `code`.
fn model_step(current: usize, len: usize, code: KeyCode) -> usize {
    let last = len - 1;
    match code {
        KeyCode::Up | KeyCode::Left => current.saturating_sub(1),
        KeyCode::Down | KeyCode::Right => (current + 1).min(last),
        KeyCode::Home => 0,
        KeyCode::End => last,
        _ => current,
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Active index in range and matches the model
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn active_index_tracks_clamped_model(
        len in 1usize..12,
        keys in proptest::collection::vec(key_strategy(), 0..48),
    ) {
        let (mut tree, _, mut listbox) = listbox_with(len);
        let mut expected = 0;
        for code in keys {
            let _ = listbox.handle_key(&mut tree, &KeyEvent::new(code));
            expected = model_step(expected, len, code);
            prop_assert_eq!(listbox.active_index(), Some(expected));
        }
    }

    #[test]
    fn empty_listbox_never_gains_an_index(
        dirs in proptest::collection::vec(direction_strategy(), 0..16),
    ) {
        let (mut tree, _, mut listbox) = listbox_with(0);
        for dir in dirs {
            prop_assert!(!listbox.move_active(&mut tree, dir));
        }
        prop_assert_eq!(listbox.active_index(), None);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2-3. Single selection and projected state
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn exactly_one_selected_and_tab_stop(
        len in 1usize..10,
        dirs in proptest::collection::vec(direction_strategy(), 0..32),
    ) {
        let (mut tree, root, mut listbox) = listbox_with(len);
        for dir in dirs {
            listbox.move_active(&mut tree, dir);

            let selected = listbox.items().iter().filter(|o| o.is_selected()).count();
            prop_assert_eq!(selected, 1);
            let stops = listbox
                .items()
                .iter()
                .filter(|o| o.tab_stop() == TabStop::Stop)
                .count();
            prop_assert_eq!(stops, 1);

            let active = listbox.active_option().unwrap();
            prop_assert!(active.is_selected());
            prop_assert_eq!(active.class(), OptionClass::Selected);
            prop_assert_eq!(tree.attribute(root, "aria-activedescendant"), Some(active.id()));
            prop_assert_eq!(tree.attribute(active.node(), "tabindex"), Some("0"));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn repeated_move_to_same_index_writes_nothing(
        len in 1usize..10,
        dir in direction_strategy(),
    ) {
        let (mut tree, _, mut listbox) = listbox_with(len);
        // First/Last are absorbing; Previous/Next saturate after len steps.
        for _ in 0..len {
            listbox.move_active(&mut tree, dir);
        }
        let writes = tree.write_count();
        prop_assert!(!listbox.move_active(&mut tree, dir));
        prop_assert_eq!(tree.write_count(), writes);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Disabled cascade
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn disabled_listbox_is_frozen(
        len in 1usize..8,
        start in 0usize..8,
        dirs in proptest::collection::vec(direction_strategy(), 1..16),
    ) {
        let (mut tree, _, mut listbox) = listbox_with(len);
        for _ in 0..start.min(len) {
            listbox.move_active(&mut tree, Direction::Next);
        }
        let before = listbox.active_index();
        listbox.set_disabled(&mut tree, true);
        prop_assert!(listbox.items().iter().all(|o| o.is_disabled()));
        prop_assert!(listbox.items().iter().all(|o| o.tab_stop() == TabStop::Unreachable));
        for dir in dirs {
            prop_assert!(!listbox.move_active(&mut tree, dir));
        }
        prop_assert_eq!(listbox.active_index(), before);
        prop_assert!(listbox.commit_active().is_none());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Select open state
// ═════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy)]
enum SelectInput {
    Toggle,
    Activate,
    Escape,
    FocusLost,
}

fn select_input_strategy() -> impl Strategy<Value = SelectInput> {
    prop_oneof![
        Just(SelectInput::Toggle),
        Just(SelectInput::Activate),
        Just(SelectInput::Escape),
        Just(SelectInput::FocusLost),
    ]
}

proptest! {
    #[test]
    fn select_open_state_follows_model(
        inputs in proptest::collection::vec(select_input_strategy(), 0..32),
    ) {
        let mut tree = ElementTree::new();
        let body = tree.root();
        let host = tree.append_element(body, "fsel-select").unwrap();
        let trigger = tree.append_element(host, "button").unwrap();
        let list = tree.append_element(host, "fsel-listbox").unwrap();
        let mut options = Vec::new();
        for label in ["A", "B", "C"] {
            let opt = tree.append_element(list, "fsel-option").unwrap();
            tree.set_attribute(opt, "role", "option");
            tree.set_text_content(opt, label);
            options.push(opt);
        }
        let mut select = Select::new();
        select.attach(&mut tree, SelectParts::new(host, trigger, list));
        select.set_options(&mut tree, &options);

        let mut open = false;
        for input in inputs {
            match input {
                SelectInput::Toggle => {
                    select.toggle_open(&mut tree);
                    open = !open;
                }
                SelectInput::Activate => {
                    let _ = select.handle_trigger_key(&mut tree, &KeyEvent::new(KeyCode::Char(' ')));
                    open = !open;
                }
                SelectInput::Escape => {
                    let _ = select.handle_trigger_key(&mut tree, &KeyEvent::new(KeyCode::Escape));
                    open = false;
                }
                SelectInput::FocusLost => {
                    let _ = select.handle_focus_out(&mut tree, None);
                    open = false;
                }
            }
            prop_assert_eq!(select.is_open(), open);
            let expanded = if open { "true" } else { "false" };
            prop_assert_eq!(tree.attribute(trigger, "aria-expanded"), Some(expanded));
            prop_assert_eq!(tree.has_attribute(list, "hidden"), !open);
        }
    }
}

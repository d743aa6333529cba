#![forbid(unsafe_code)]

//! Element scaffolding for hosts without a real document.
//!
//! [`SelectScaffold::build`] appends the markup a [`Select`] expects to an
//! [`ElementTree`]:
//!
//! ```text
//! fsel-select            (host)
//! ├── button             (trigger)
//! │   └── span           (selected value display)
//! └── fsel-listbox
//!     └── fsel-option    role="option", one per label
//! input type="hidden"    (form proxy, sibling of the host)
//! ```
//!
//! # Example
//!
//! ```
//! use fsel::prelude::*;
//!
//! # fn main() -> fsel::Result<()> {
//! let mut tree = ElementTree::new();
//! let body = tree.root();
//! let scaffold = SelectScaffold::build(&mut tree, body, ["Apple", "Banana"])?;
//! let mut select = Select::new();
//! scaffold.mount(&mut tree, &mut select);
//!
//! let _ = select.handle_event(&mut tree, &Event::Key(KeyEvent::new(KeyCode::Enter)));
//! assert!(select.is_open());
//! # Ok(())
//! # }
//! ```

use fsel_core::dom::{ElementTree, NodeId};
use fsel_core::surface::Surface;
use fsel_widgets::{Select, SelectParts};

use crate::{Error, Result};

/// Elements created for one select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectScaffold {
    /// The parts to attach a [`Select`] to.
    pub parts: SelectParts,
    /// Option elements in document order.
    pub options: Vec<NodeId>,
}

impl SelectScaffold {
    /// Append select markup under `parent`, one option per label.
    ///
    /// # Errors
    ///
    /// [`Error::NoOptions`] when `labels` is empty (nothing is appended), or
    /// [`Error::Dom`] when `parent` is not in the tree.
    pub fn build<I, T>(tree: &mut ElementTree, parent: NodeId, labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let labels: Vec<T> = labels.into_iter().collect();
        if labels.is_empty() {
            return Err(Error::NoOptions);
        }

        let host = tree.append_element(parent, "fsel-select")?;
        let trigger = tree.append_element(host, "button")?;
        let display = tree.append_element(trigger, "span")?;
        let listbox = tree.append_element(host, "fsel-listbox")?;
        let proxy = tree.append_element(parent, "input")?;
        tree.set_attribute(proxy, "type", "hidden");

        let mut options = Vec::with_capacity(labels.len());
        for label in &labels {
            let option = tree.append_element(listbox, "fsel-option")?;
            tree.set_attribute(option, "role", "option");
            tree.set_text_content(option, label.as_ref());
            options.push(option);
        }

        let parts = SelectParts::new(host, trigger, listbox)
            .with_selected_value(display)
            .with_proxy(proxy);
        Ok(Self { parts, options })
    }

    /// Attach `select` to the scaffold and populate its listbox.
    pub fn mount(&self, tree: &mut ElementTree, select: &mut Select) {
        select.attach(tree, self.parts);
        select.set_options(tree, &self.options);
    }
}

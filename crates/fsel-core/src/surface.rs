#![forbid(unsafe_code)]

//! The rendering surface seam.
//!
//! Controls never own their elements. They read structure (roles, parents,
//! text) from a [`Surface`] and write accessibility attributes, text, and
//! focus requests back to it. A browser bridge, a terminal host, or the
//! in-memory [`ElementTree`](crate::dom::ElementTree) can all serve.
//!
//! Every method is infallible: writes to unknown nodes are dropped and
//! reads of unknown nodes return `None`/empty, so a malformed document can
//! make a control inert but never makes it fail.

use crate::dom::NodeId;

/// Host document as seen by list-selection controls.
pub trait Surface {
    /// Parent element of `node`, if attached.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Value of attribute `name` on `node`.
    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;

    /// Concatenated text of `node` and its descendants.
    fn text_content(&self, node: NodeId) -> String;

    /// Set attribute `name` on `node`.
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    /// Remove attribute `name` from `node`.
    fn remove_attribute(&mut self, node: NodeId, name: &str);

    /// Replace the text of `node`.
    fn set_text_content(&mut self, node: NodeId, text: &str);

    /// Request input focus for `node`.
    fn focus(&mut self, node: NodeId);

    /// The `role` attribute of `node`.
    fn role(&self, node: NodeId) -> Option<&str> {
        self.attribute(node, "role")
    }

    /// Whether `node` carries attribute `name`.
    fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Whether `node` is marked disabled by its author.
    fn is_disabled(&self, node: NodeId) -> bool {
        self.has_attribute(node, "disabled")
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Nearest ancestor-or-self of `node` whose `role` is `role`.
    fn closest_with_role(&self, node: NodeId, role: &str) -> Option<NodeId> {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if self.role(current) == Some(role) {
                return Some(current);
            }
            cursor = self.parent(current);
        }
        None
    }

    /// Write a `"true"`/`"false"` attribute.
    fn set_bool_attribute(&mut self, node: NodeId, name: &str, value: bool) {
        self.set_attribute(node, name, if value { "true" } else { "false" });
    }

    /// Add (empty-valued) or remove a presence attribute such as `hidden`.
    fn toggle_attribute(&mut self, node: NodeId, name: &str, present: bool) {
        if present {
            self.set_attribute(node, name, "");
        } else {
            self.remove_attribute(node, name);
        }
    }
}

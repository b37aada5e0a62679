//! Host environment abstraction.
//!
//! The tag editor never touches a concrete document directly. Every DOM
//! mutation it performs goes through the [`Host`] trait, so the commit,
//! remove and visibility logic can run against the in-memory [`Document`]
//! in tests and in the terminal front end alike.
//!
//! All operations are guarded: passing an unknown or detached node id is a
//! no-op (or yields `None` / an empty result), never a panic.

mod document;
mod markup;
mod selector;

pub use document::Document;
pub use markup::to_html;
pub use selector::{Selector, SelectorError};

/// Opaque handle to a node owned by a [`Host`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

/// The document environment a widget mutates.
pub trait Host {
    /// The root element of the document.
    fn root(&self) -> NodeId;

    /// Create a detached element with the given tag name.
    fn create_element(&mut self, tag: &str) -> NodeId;

    /// Create a detached text node.
    fn create_text(&mut self, text: &str) -> NodeId;

    /// Lowercase tag name of an element, `None` for text or unknown nodes.
    fn tag_name(&self, node: NodeId) -> Option<&str>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);
    fn remove_attribute(&mut self, node: NodeId, name: &str);

    /// Inline style property value.
    fn style(&self, node: NodeId, property: &str) -> Option<&str>;
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);
    fn remove_style(&mut self, node: NodeId, property: &str);

    /// Concatenated text of the node and its descendants.
    fn text_content(&self, node: NodeId) -> String;

    /// Append `child` to `parent`, detaching it from any previous parent.
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Detach a node from its parent.
    fn remove(&mut self, node: NodeId);

    /// Put `new` in the position of `old`. Returns `false` if `old` has no
    /// parent, in which case nothing changes.
    fn replace(&mut self, old: NodeId, new: NodeId) -> bool;

    fn parent(&self, node: NodeId) -> Option<NodeId>;
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Descendants of `root` matching `selector`, in document order.
    fn query_selector_all(&self, root: NodeId, selector: &Selector) -> Vec<NodeId>;

    /// Current value of a form control. Falls back to the `value` attribute
    /// when the control has not been edited.
    fn value(&self, node: NodeId) -> Option<&str>;
    fn set_value(&mut self, node: NodeId, value: &str);

    fn focus(&mut self, node: NodeId);
    fn blur(&mut self, node: NodeId);
    fn focused(&self) -> Option<NodeId>;

    /// First descendant of `root` matching `selector`.
    fn query_selector(&self, root: NodeId, selector: &Selector) -> Option<NodeId> {
        self.query_selector_all(root, selector).into_iter().next()
    }

    /// Whether the `class` attribute contains `class` as a whole token.
    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attribute(node, "class")
            .map(|c| c.split_ascii_whitespace().any(|t| t == class))
            .unwrap_or(false)
    }

    /// Whether `node` is `ancestor` or lies inside it.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if n == ancestor {
                return true;
            }
            cur = self.parent(n);
        }
        false
    }
}

//! In-memory document tree.

use super::{Host, NodeId, Selector};

#[derive(Debug, Clone)]
enum NodeKind {
    Element {
        name: String,
        attributes: Vec<(String, String)>,
        style: Vec<(String, String)>,
        /// Edited control value; `None` until the control is written to.
        value: Option<String>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An arena-backed document implementing [`Host`].
///
/// Nodes are never freed: removing a node only detaches it, so ids held by
/// callers stay valid (and simply stop matching queries).
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: NodeId,
    focused: Option<NodeId>,
}

impl Document {
    /// Create an empty document with a `body` root element.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            focused: None,
        };
        doc.root = doc.create_element("body");
        doc
    }

    fn get(&self, node: NodeId) -> Option<&NodeData> {
        self.nodes.get(node.0 as usize)
    }

    fn get_mut(&mut self, node: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(node.0 as usize)
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Whether the node is reachable from the root.
    pub fn is_attached(&self, node: NodeId) -> bool {
        self.get(node).is_some() && self.contains(self.root, node)
    }

    /// Text of a text node.
    pub(crate) fn text(&self, node: NodeId) -> Option<&str> {
        match &self.get(node)?.kind {
            NodeKind::Text(t) => Some(t.as_str()),
            NodeKind::Element { .. } => None,
        }
    }

    /// Attributes of an element, in insertion order.
    pub(crate) fn attributes(&self, node: NodeId) -> &[(String, String)] {
        match self.get(node).map(|n| &n.kind) {
            Some(NodeKind::Element { attributes, .. }) => attributes.as_slice(),
            _ => &[],
        }
    }

    /// Inline style declarations of an element, in insertion order.
    pub(crate) fn styles(&self, node: NodeId) -> &[(String, String)] {
        match self.get(node).map(|n| &n.kind) {
            Some(NodeKind::Element { style, .. }) => style.as_slice(),
            _ => &[],
        }
    }

    /// Convenience: create an element and set its attributes.
    pub fn element(&mut self, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let id = self.create_element(tag);
        for (k, v) in attributes {
            self.set_attribute(id, k, v);
        }
        id
    }

    fn collect_matches(&self, node: NodeId, selector: &Selector, out: &mut Vec<NodeId>) {
        let Some(data) = self.get(node) else {
            return;
        };
        for &child in &data.children {
            if let Some(tag) = self.tag_name(child) {
                if selector.matches(tag, self.attribute(child, "id"), self.attribute(child, "class")) {
                    out.push(child);
                }
            }
            self.collect_matches(child, selector, out);
        }
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.get(node).and_then(|n| n.parent) else {
            return;
        };
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|&c| c != node);
        }
        if let Some(n) = self.get_mut(node) {
            n.parent = None;
        }
    }

    fn clear_focus_within(&mut self, node: NodeId) {
        if let Some(f) = self.focused {
            if self.contains(node, f) {
                self.focused = None;
            }
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for Document {
    fn root(&self) -> NodeId {
        self.root
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element {
            name: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            style: Vec::new(),
            value: None,
        })
    }

    fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        match &self.get(node)?.kind {
            NodeKind::Element { name, .. } => Some(name.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.attributes(node)
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(NodeKind::Element { attributes, .. }) = self.get_mut(node).map(|n| &mut n.kind)
        else {
            return;
        };
        match attributes.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
            Some((_, v)) => *v = value.to_string(),
            None => attributes.push((name.to_ascii_lowercase(), value.to_string())),
        }
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(NodeKind::Element { attributes, .. }) = self.get_mut(node).map(|n| &mut n.kind) {
            attributes.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.styles(node)
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.as_str())
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let Some(NodeKind::Element { style, .. }) = self.get_mut(node).map(|n| &mut n.kind) else {
            return;
        };
        match style.iter_mut().find(|(k, _)| k == property) {
            Some((_, v)) => *v = value.to_string(),
            None => style.push((property.to_string(), value.to_string())),
        }
    }

    fn remove_style(&mut self, node: NodeId, property: &str) {
        if let Some(NodeKind::Element { style, .. }) = self.get_mut(node).map(|n| &mut n.kind) {
            style.retain(|(k, _)| k != property);
        }
    }

    fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            let Some(data) = self.get(n) else {
                continue;
            };
            if let NodeKind::Text(t) = &data.kind {
                out.push_str(t);
            }
            stack.extend(data.children.iter().rev());
        }
        out
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.get(child).is_none() || self.contains(child, parent) {
            return;
        }
        if !matches!(self.get(parent).map(|p| &p.kind), Some(NodeKind::Element { .. })) {
            return;
        }
        self.detach(child);
        if let Some(p) = self.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    fn remove(&mut self, node: NodeId) {
        if node == self.root {
            return;
        }
        self.clear_focus_within(node);
        self.detach(node);
    }

    fn replace(&mut self, old: NodeId, new: NodeId) -> bool {
        if old == new || self.get(new).is_none() || self.contains(new, old) {
            return false;
        }
        let Some(parent) = self.parent(old) else {
            return false;
        };
        self.detach(new);
        let Some(p) = self.get_mut(parent) else {
            return false;
        };
        let Some(pos) = p.children.iter().position(|&c| c == old) else {
            return false;
        };
        p.children[pos] = new;
        if let Some(n) = self.get_mut(new) {
            n.parent = Some(parent);
        }
        if let Some(o) = self.get_mut(old) {
            o.parent = None;
        }
        self.clear_focus_within(old);
        true
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.parent
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.get(node).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn query_selector_all(&self, root: NodeId, selector: &Selector) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_matches(root, selector, &mut out);
        out
    }

    fn value(&self, node: NodeId) -> Option<&str> {
        match &self.get(node)?.kind {
            NodeKind::Element { value: Some(v), .. } => Some(v.as_str()),
            NodeKind::Element { .. } => self.attribute(node, "value"),
            NodeKind::Text(_) => None,
        }
    }

    fn set_value(&mut self, node: NodeId, new_value: &str) {
        if let Some(NodeKind::Element { value, .. }) = self.get_mut(node).map(|n| &mut n.kind) {
            *value = Some(new_value.to_string());
        }
    }

    fn focus(&mut self, node: NodeId) {
        if self.tag_name(node).is_some() && self.is_attached(node) {
            self.focused = Some(node);
        }
    }

    fn blur(&mut self, node: NodeId) {
        if self.focused == Some(node) {
            self.focused = None;
        }
    }

    fn focused(&self) -> Option<NodeId> {
        self.focused
    }
}

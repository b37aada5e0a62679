//! HTML serialization of a [`Document`] subtree.

use super::{Document, Host, NodeId};

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Serialize `node` and its descendants as HTML markup.
///
/// Inline styles are written as a `style` attribute after the regular
/// attributes. Edited control values are not serialized, matching how a
/// browser reports `outerHTML`.
pub fn to_html(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, node, &mut out);
    out
}

fn write_node(doc: &Document, node: NodeId, out: &mut String) {
    if let Some(text) = doc.text(node) {
        escape_into(text, false, out);
        return;
    }
    let Some(tag) = doc.tag_name(node) else {
        return;
    };

    out.push('<');
    out.push_str(tag);
    for (k, v) in doc.attributes(node) {
        out.push(' ');
        out.push_str(k);
        out.push_str("=\"");
        escape_into(v, true, out);
        out.push('"');
    }
    let styles = doc.styles(node);
    if !styles.is_empty() {
        let decls: Vec<String> = styles.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        out.push_str(" style=\"");
        escape_into(&decls.join("; "), true, out);
        out.push('"');
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&tag) {
        return;
    }
    for child in doc.children(node) {
        write_node(doc, child, out);
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn escape_into(s: &str, attr: bool, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attr => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_nested() {
        let mut doc = Document::new();
        let root = doc.root();
        let ul = doc.element("ul", &[("class", "tags")]);
        let li = doc.create_element("li");
        let text = doc.create_text("a < b");
        doc.append_child(root, ul);
        doc.append_child(ul, li);
        doc.append_child(li, text);

        assert_eq!(
            to_html(&doc, ul),
            r#"<ul class="tags"><li>a &lt; b</li></ul>"#
        );
    }

    #[test]
    fn test_serialize_void_and_style() {
        let mut doc = Document::new();
        let input = doc.element("input", &[("type", "hidden"), ("value", "say \"hi\"")]);
        doc.set_style(input, "display", "none");
        assert_eq!(
            to_html(&doc, input),
            r#"<input type="hidden" value="say &quot;hi&quot;" style="display: none">"#
        );
    }
}

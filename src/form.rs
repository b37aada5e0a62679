//! Form submission: collect named controls and url-encode them.

use crate::dom::{Host, NodeId, Selector};

/// Input types that never contribute to a submission.
const SKIPPED_TYPES: [&str; 5] = ["submit", "button", "reset", "image", "file"];

/// Collect `(name, value)` pairs for the controls under `root`.
///
/// Follows what a browser submits for `<input>` elements: controls need a
/// non-empty `name`, disabled controls are skipped, and checkboxes/radios
/// only count when checked. Order is document order, so repeated names such
/// as `tags[]` keep the order their chips were added in.
pub fn collect<H: Host>(host: &H, root: NodeId) -> Vec<(String, String)> {
    let Ok(inputs) = Selector::parse("input") else {
        return Vec::new();
    };

    host.query_selector_all(root, &inputs)
        .into_iter()
        .filter_map(|input| {
            let name = host.attribute(input, "name").filter(|n| !n.is_empty())?;
            if host.attribute(input, "disabled").is_some() {
                return None;
            }
            let ty = host.attribute(input, "type").unwrap_or("text").to_ascii_lowercase();
            if SKIPPED_TYPES.contains(&ty.as_str()) {
                return None;
            }
            let checkable = ty == "checkbox" || ty == "radio";
            if checkable && host.attribute(input, "checked").is_none() {
                return None;
            }
            let default = if checkable { "on" } else { "" };
            let value = host.value(input).unwrap_or(default);
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}

/// Encode pairs as `application/x-www-form-urlencoded`.
pub fn encode(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Percent-encode one component, with spaces as `+`.
fn encode_component(s: &str) -> String {
    urlencoding::encode(s).replace("%20", "+")
}

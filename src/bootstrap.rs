//! Page bootstrap: turn every matching input into a tag editor.

use tracing::{debug, info};

use crate::dom::{Host, Selector, SelectorError};
use crate::editor::{EditorConfig, TagEditor};

/// Selector used when the page does not name one.
pub const DEFAULT_SELECTOR: &str = ".tagfield";

/// Construct a [`TagEditor`] over every element matching `selector`.
///
/// Editors are returned in document order.
pub fn init_all<H: Host>(
    host: &mut H,
    selector: &str,
    config: &EditorConfig,
) -> Result<Vec<TagEditor>, SelectorError> {
    init_all_with(host, selector, config, |_, _| {})
}

/// Like [`init_all`], calling `on_init` after each editor is constructed.
pub fn init_all_with<H, F>(
    host: &mut H,
    selector: &str,
    config: &EditorConfig,
    mut on_init: F,
) -> Result<Vec<TagEditor>, SelectorError>
where
    H: Host,
    F: FnMut(&mut TagEditor, &mut H),
{
    let selector = Selector::parse(selector)?;
    let root = host.root();
    let targets = host.query_selector_all(root, &selector);
    debug!(%selector, count = targets.len(), "Bootstrapping tag editors");

    let mut editors = Vec::with_capacity(targets.len());
    for target in targets {
        let mut editor = TagEditor::new(host, target, config.clone());
        on_init(&mut editor, host);
        editors.push(editor);
    }

    info!(count = editors.len(), "Tag editors initialized");
    Ok(editors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    fn page(names: &[&str]) -> Document {
        let mut doc = Document::new();
        let root = doc.root();
        let form = doc.create_element("form");
        doc.append_child(root, form);
        for name in names {
            let input = doc.element("input", &[("class", "tagfield"), ("name", *name)]);
            doc.append_child(form, input);
        }
        let plain = doc.element("input", &[("name", "title")]);
        doc.append_child(form, plain);
        doc
    }

    #[test]
    fn test_init_all_matches_in_order() {
        let mut doc = page(&["labels", "components"]);
        let editors = init_all(&mut doc, DEFAULT_SELECTOR, &EditorConfig::default()).unwrap();

        let names: Vec<_> = editors.iter().map(|e| e.base_name()).collect();
        assert_eq!(names, vec![Some("labels"), Some("components")]);
        for editor in &editors {
            assert!(doc.is_attached(editor.wrapper()));
        }
    }

    #[test]
    fn test_init_all_leaves_other_inputs() {
        let mut doc = page(&["labels"]);
        init_all(&mut doc, DEFAULT_SELECTOR, &EditorConfig::default()).unwrap();

        let sel = Selector::parse("input").unwrap();
        let root = doc.root();
        let names: Vec<_> = doc
            .query_selector_all(root, &sel)
            .into_iter()
            .filter_map(|n| doc.attribute(n, "name"))
            .collect();
        assert_eq!(names, vec!["labels", "title"]);
    }

    #[test]
    fn test_text_field_keeps_selector_class() {
        let mut doc = page(&["labels"]);
        let editors = init_all(&mut doc, DEFAULT_SELECTOR, &EditorConfig::default()).unwrap();
        let field = editors[0].text_field();

        let sel = Selector::parse(DEFAULT_SELECTOR).unwrap();
        let root = doc.root();
        assert_eq!(doc.query_selector_all(root, &sel), vec![field]);
    }

    #[test]
    fn test_init_all_no_matches() {
        let mut doc = page(&[]);
        let editors = init_all(&mut doc, DEFAULT_SELECTOR, &EditorConfig::default()).unwrap();
        assert!(editors.is_empty());
    }

    #[test]
    fn test_init_all_invalid_selector() {
        let mut doc = page(&["labels"]);
        let result = init_all(&mut doc, "form > input", &EditorConfig::default());
        assert!(matches!(result, Err(SelectorError::Unsupported(_))));
    }

    #[test]
    fn test_callback_runs_per_editor() {
        let mut doc = page(&["a", "b", "c"]);
        let mut seen = Vec::new();
        let editors = init_all_with(
            &mut doc,
            DEFAULT_SELECTOR,
            &EditorConfig::default(),
            |editor, host| {
                host.set_attribute(editor.text_field(), "data-ready", "1");
                seen.push(editor.base_name().map(str::to_string));
            },
        )
        .unwrap();

        assert_eq!(seen.len(), 3);
        assert_eq!(seen[2].as_deref(), Some("c"));
        for editor in &editors {
            assert_eq!(doc.attribute(editor.text_field(), "data-ready"), Some("1"));
        }
    }

    #[test]
    fn test_config_shared_by_all_editors() {
        let mut doc = page(&["a", "b"]);
        let config = EditorConfig {
            trim_input: true,
            ..Default::default()
        };
        let editors = init_all(&mut doc, DEFAULT_SELECTOR, &config).unwrap();
        assert!(editors.iter().all(|e| e.config().trim_input));
    }
}

//! Chip-based tag editor over a text input element.
//!
//! [`TagEditor::new`] replaces a source `<input>` with this structure:
//!
//! ```text
//! div.tag-editor[data-active]
//! ├── input            (name/id/class/placeholder of the source)
//! └── ul.tag-editor-tags
//!     └── li.tag-editor-tag *
//!         ├── span.tag-editor-label   tag text
//!         ├── input[type=hidden]      name="<name>[]" value="<text>"
//!         └── a.tag-editor-remove     ×
//! ```
//!
//! Pressing Enter in the text field commits its value as a chip. The hidden
//! inputs let the tag list submit with the surrounding form as a repeated
//! field.

mod config;
mod text_field;

pub use config::{Dimension, EditorConfig};
pub use text_field::{FieldEdit, TextCaret};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, trace, warn};

use crate::dom::{Host, NodeId};

/// Class of the wrapper element.
pub const WRAPPER_CLASS: &str = "tag-editor";
/// Class of the tag list region.
pub const TAG_LIST_CLASS: &str = "tag-editor-tags";
/// Class of a chip.
pub const TAG_CLASS: &str = "tag-editor-tag";
/// Class of a chip's text.
pub const LABEL_CLASS: &str = "tag-editor-label";
/// Class of a chip's remove control.
pub const REMOVE_CLASS: &str = "tag-editor-remove";
/// Wrapper attribute holding the active visual state.
pub const ACTIVE_ATTR: &str = "data-active";

/// Attributes carried over from the source input to the text field.
const CARRIED_ATTRIBUTES: [&str; 4] = ["name", "id", "class", "placeholder"];

/// Events the editor reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// A key pressed while the text field has focus.
    KeyPress(KeyEvent),
    /// The text field gained focus.
    Focus,
    /// The text field lost focus.
    Blur,
    /// The pointer entered the wrapper.
    MouseEnter,
    /// The pointer left the wrapper.
    MouseLeave,
    /// A node inside the wrapper was clicked.
    Click(NodeId),
}

/// Change to the tag list resulting from an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagAction {
    /// A tag was committed (tag text).
    Added(String),
    /// A tag was removed (tag text).
    Removed(String),
}

/// Name of the hidden field for tags of a field named `base`.
///
/// `[]` is appended unless `base` already ends with it. A missing name
/// yields `"[]"`.
pub fn hidden_field_name(base: Option<&str>) -> String {
    let base = base.unwrap_or_default();
    if base.ends_with("[]") {
        base.to_string()
    } else {
        format!("{}[]", base)
    }
}

/// A tag editor bound to one replaced input.
///
/// The editor owns no DOM; it holds ids into the [`Host`] it was built in
/// and must be driven with that same host.
#[derive(Debug, Clone)]
pub struct TagEditor {
    config: EditorConfig,
    wrapper: NodeId,
    field: NodeId,
    tag_list: NodeId,
    /// `name` of the source input.
    base_name: Option<String>,
    /// Whether the pointer is over the wrapper.
    hovered: bool,
    caret: TextCaret,
}

impl TagEditor {
    /// Build the editor structure and put it in place of `source`.
    ///
    /// If `source` is detached the structure is still built but not inserted.
    pub fn new<H: Host>(host: &mut H, source: NodeId, config: EditorConfig) -> Self {
        let base_name = host.attribute(source, "name").map(str::to_string);
        if base_name.is_none() {
            warn!(?source, "Source input has no name attribute; tags will submit as \"[]\"");
        }

        let wrapper = host.create_element("div");
        host.set_attribute(wrapper, "class", WRAPPER_CLASS);
        host.set_attribute(wrapper, ACTIVE_ATTR, if config.debug { "true" } else { "false" });

        let field = host.create_element("input");
        host.set_attribute(field, "type", "text");
        for attr in CARRIED_ATTRIBUTES {
            if let Some(value) = host.attribute(source, attr).map(str::to_string) {
                host.set_attribute(field, attr, &value);
            }
        }
        let initial = host.value(source).unwrap_or_default().to_string();
        host.set_value(field, &initial);
        let had_focus = host.focused() == Some(source);

        let tag_list = host.create_element("ul");
        host.set_attribute(tag_list, "class", TAG_LIST_CLASS);
        host.set_style(tag_list, "display", "none");
        for (prop, value) in config.dimension_styles() {
            host.set_style(tag_list, prop, &value);
        }

        host.append_child(wrapper, field);
        host.append_child(wrapper, tag_list);
        if !host.replace(source, wrapper) {
            warn!(?source, "Source input is not attached; editor was not inserted");
        }

        let mut caret = TextCaret::new();
        caret.move_to_end(&initial);

        let mut editor = Self {
            config,
            wrapper,
            field,
            tag_list,
            base_name,
            hovered: false,
            caret,
        };
        if had_focus {
            host.focus(field);
            editor.on_focus(host);
        }

        debug!(
            name = editor.base_name.as_deref().unwrap_or(""),
            debug = editor.config.debug,
            trim_input = editor.config.trim_input,
            "Tag editor constructed"
        );
        editor
    }

    /// The wrapper element that replaced the source input.
    pub fn wrapper(&self) -> NodeId {
        self.wrapper
    }

    /// The active text field, for attaching external behavior.
    pub fn text_field(&self) -> NodeId {
        self.field
    }

    /// The tag list region.
    pub fn tag_list(&self) -> NodeId {
        self.tag_list
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// `name` attribute of the source input.
    pub fn base_name(&self) -> Option<&str> {
        self.base_name.as_deref()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Caret position in the text field, in chars.
    pub fn caret(&self) -> usize {
        self.caret.position()
    }

    /// Whether the active visual state is on.
    pub fn is_active<H: Host>(&self, host: &H) -> bool {
        host.attribute(self.wrapper, ACTIVE_ATTR) == Some("true")
    }

    /// Whether the tag list region is shown.
    pub fn is_tag_list_visible<H: Host>(&self, host: &H) -> bool {
        host.style(self.tag_list, "display") != Some("none")
    }

    /// Chip elements in display order.
    pub fn chips<H: Host>(&self, host: &H) -> Vec<NodeId> {
        host.children(self.tag_list)
            .into_iter()
            .filter(|&c| host.has_class(c, TAG_CLASS))
            .collect()
    }

    /// Committed tag texts in display order.
    pub fn tags<H: Host>(&self, host: &H) -> Vec<String> {
        self.chips(host)
            .into_iter()
            .map(|chip| chip_text(host, chip))
            .collect()
    }

    /// Current value of the text field.
    pub fn input_value<'h, H: Host>(&self, host: &'h H) -> &'h str {
        host.value(self.field).unwrap_or_default()
    }

    /// Append a chip showing `text`, with a hidden field derived from `name`.
    ///
    /// Returns the chip element.
    pub fn add_tag<H: Host>(&mut self, host: &mut H, name: Option<&str>, text: &str) -> NodeId {
        let chip = host.create_element("li");
        host.set_attribute(chip, "class", TAG_CLASS);

        let label = host.create_element("span");
        host.set_attribute(label, "class", LABEL_CLASS);
        let label_text = host.create_text(text);
        host.append_child(label, label_text);
        host.append_child(chip, label);

        let hidden = host.create_element("input");
        host.set_attribute(hidden, "type", "hidden");
        host.set_attribute(hidden, "name", &hidden_field_name(name));
        host.set_attribute(hidden, "value", text);
        host.append_child(chip, hidden);

        let remove = host.create_element("a");
        host.set_attribute(remove, "class", REMOVE_CLASS);
        let remove_text = host.create_text("×");
        host.append_child(remove, remove_text);
        host.append_child(chip, remove);

        host.append_child(self.tag_list, chip);
        self.set_tag_list_visible(host, true);

        debug!(tag = text, "Tag added");
        chip
    }

    /// Remove the chip that owns `remove_control`.
    ///
    /// Focus returns to the text field and the tag list is hidden once empty.
    /// Returns the removed tag text, or `None` if `remove_control` is not a
    /// remove control of one of this editor's chips.
    pub fn remove_tag<H: Host>(&mut self, host: &mut H, remove_control: NodeId) -> Option<String> {
        if !host.has_class(remove_control, REMOVE_CLASS) {
            return None;
        }
        let chip = host.parent(remove_control)?;
        if host.parent(chip) != Some(self.tag_list) {
            return None;
        }

        let text = chip_text(host, chip);
        host.remove(chip);
        host.focus(self.field);
        self.on_focus(host);

        if self.chips(host).is_empty() {
            self.set_tag_list_visible(host, false);
        }

        debug!(tag = %text, "Tag removed");
        Some(text)
    }

    /// Dispatch an event to the editor.
    pub fn handle_event<H: Host>(&mut self, host: &mut H, event: EditorEvent) -> Option<TagAction> {
        trace!(?event, "Tag editor event");
        match event {
            EditorEvent::KeyPress(key) => self.on_key(host, key),
            EditorEvent::Focus => {
                self.on_focus(host);
                None
            }
            EditorEvent::Blur => {
                self.on_blur(host);
                None
            }
            EditorEvent::MouseEnter => {
                self.hovered = true;
                None
            }
            EditorEvent::MouseLeave => {
                self.hovered = false;
                None
            }
            EditorEvent::Click(target) => {
                let control = self.remove_control_for(host, target)?;
                self.remove_tag(host, control).map(TagAction::Removed)
            }
        }
    }

    /// Commit on Enter; any other key edits the field.
    fn on_key<H: Host>(&mut self, host: &mut H, key: KeyEvent) -> Option<TagAction> {
        if key.code == KeyCode::Enter && key.modifiers == KeyModifiers::NONE {
            return self.commit(host);
        }

        let mut value = self.input_value(host).to_string();
        if self.caret.handle_input(&mut value, key) == FieldEdit::Changed {
            host.set_value(self.field, &value);
        }
        None
    }

    /// Turn the field's value into a chip and clear the field.
    fn commit<H: Host>(&mut self, host: &mut H) -> Option<TagAction> {
        let value = self.input_value(host).to_string();
        if value.trim().is_empty() {
            trace!("Ignoring commit of blank value");
            return None;
        }

        let text = if self.config.trim_input {
            value.trim().to_string()
        } else {
            value
        };
        let name = self.base_name.clone();
        self.add_tag(host, name.as_deref(), &text);

        host.set_value(self.field, "");
        self.caret.reset();
        Some(TagAction::Added(text))
    }

    fn on_focus<H: Host>(&mut self, host: &mut H) {
        host.set_attribute(self.wrapper, ACTIVE_ATTR, "true");
    }

    fn on_blur<H: Host>(&mut self, host: &mut H) {
        let active = self.config.debug || self.hovered;
        host.set_attribute(self.wrapper, ACTIVE_ATTR, if active { "true" } else { "false" });
    }

    fn set_tag_list_visible<H: Host>(&self, host: &mut H, visible: bool) {
        if visible {
            host.remove_style(self.tag_list, "display");
        } else {
            host.set_style(self.tag_list, "display", "none");
        }
    }

    /// The remove control at or above `target`, if it belongs to this editor.
    fn remove_control_for<H: Host>(&self, host: &H, target: NodeId) -> Option<NodeId> {
        if !host.contains(self.tag_list, target) {
            return None;
        }
        let mut cur = Some(target);
        while let Some(n) = cur {
            if n == self.tag_list {
                return None;
            }
            if host.has_class(n, REMOVE_CLASS) {
                return Some(n);
            }
            cur = host.parent(n);
        }
        None
    }
}

/// Text of a chip's label.
fn chip_text<H: Host>(host: &H, chip: NodeId) -> String {
    host.children(chip)
        .into_iter()
        .find(|&c| host.has_class(c, LABEL_CLASS))
        .map(|label| host.text_content(label))
        .unwrap_or_default()
}

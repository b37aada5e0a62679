//! Main application state and event loop.
//!
//! The application owns a [`Document`] holding a single form, turns the
//! form's inputs into tag editors on startup, and routes terminal events to
//! them following The Elm Architecture: [`App::update`] changes state,
//! [`App::view`] draws it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::{debug, info, trace, warn};

use crate::bootstrap::init_all_with;
use crate::config::{Config, FieldSpec};
use crate::dom::{to_html, Document, Host, NodeId};
use crate::editor::{EditorEvent, TagAction, TagEditor};
use crate::error::Result;
use crate::events::Event;
use crate::form;
use crate::ui::{render_help, required_height, EditorLayout, TagEditorView, Theme};

/// Class every generated field carries so the default selector finds it.
const FIELD_CLASS: &str = "tagfield";

const HELP: &str =
    "[Enter] add tag  [Tab] next field  [click ×] remove  [Ctrl+S] submit  [Esc] quit";

/// The main application struct that holds all state.
pub struct App {
    /// The page holding the form.
    doc: Document,
    /// The form element.
    form: NodeId,
    /// One editor per matched field, in document order.
    editors: Vec<TagEditor>,
    /// Border label per editor.
    labels: Vec<String>,
    /// Index of the editor whose text field has keyboard focus.
    focused: Option<usize>,
    /// Screen regions from the last frame.
    layouts: Vec<EditorLayout>,
    title: String,
    theme: Theme,
    /// Message about the last tag change.
    status: Option<String>,
    /// Url-encoded form data once submitted.
    submission: Option<String>,
    should_quit: bool,
}

impl App {
    /// Build the form described by `config` and attach tag editors to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured selector cannot be parsed.
    pub fn new(config: &Config) -> Result<Self> {
        let fields = config.effective_fields();
        let mut doc = Document::new();
        let form = build_form(&mut doc, &fields);

        let mut labels = Vec::new();
        let editors = init_all_with(
            &mut doc,
            &config.settings.selector,
            &config.editor,
            |editor, _host| {
                let label = fields
                    .iter()
                    .find(|f| Some(f.name.as_str()) == editor.base_name())
                    .map(|f| f.display_label().to_string())
                    .or_else(|| editor.base_name().map(str::to_string))
                    .unwrap_or_else(|| "tags".to_string());
                debug!(label = %label, "Editor ready");
                labels.push(label);
            },
        )?;

        if editors.len() != fields.len() {
            warn!(
                selector = %config.settings.selector,
                matched = editors.len(),
                fields = fields.len(),
                "Selector did not match every field"
            );
        }

        let mut app = Self {
            doc,
            form,
            editors,
            labels,
            focused: None,
            layouts: Vec::new(),
            title: config.settings.title.clone(),
            theme: Theme::default(),
            status: None,
            submission: None,
            should_quit: false,
        };
        if !app.editors.is_empty() {
            app.set_focus(Some(0));
        }
        Ok(app)
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn editors(&self) -> &[TagEditor] {
        &self.editors
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The submitted form data, if the user submitted.
    pub fn submission(&self) -> Option<&str> {
        self.submission.as_deref()
    }

    /// Markup of the form in its current state.
    pub fn markup(&self) -> String {
        to_html(&self.doc, self.form)
    }

    /// Update the application state based on an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
            Event::FocusGained => {
                if let Some(i) = self.focused {
                    self.dispatch(i, EditorEvent::Focus);
                }
            }
            Event::FocusLost => {
                if let Some(i) = self.focused {
                    self.dispatch(i, EditorEvent::Blur);
                }
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => {}
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                info!("Quit requested");
                self.should_quit = true;
            }
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => self.submit(),
            (KeyCode::Tab, KeyModifiers::NONE) => self.cycle_focus(true),
            (KeyCode::BackTab, _) => self.cycle_focus(false),
            _ => {
                if let Some(i) = self.focused {
                    self.dispatch(i, EditorEvent::KeyPress(key_event));
                }
            }
        }
    }

    fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        let (col, row) = (mouse_event.column, mouse_event.row);
        self.update_hover(col, row);

        if mouse_event.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }

        let Some(i) = self.layouts.iter().position(|l| l.contains(col, row)) else {
            self.set_focus(None);
            return;
        };
        let layout = &self.layouts[i];

        if layout.field_contains(col, row) {
            self.set_focus(Some(i));
        } else if let Some(control) = layout.remove_control_at(col, row) {
            // Pressing the control takes focus from the field first; the
            // editor hands it back once the chip is gone.
            self.set_focus(None);
            self.dispatch(i, EditorEvent::Click(control));
            self.sync_focus();
        } else {
            self.set_focus(None);
        }
    }

    /// Send enter/leave events for editors the pointer crossed.
    fn update_hover(&mut self, col: u16, row: u16) {
        for i in 0..self.editors.len() {
            let inside = self.layouts.get(i).is_some_and(|l| l.contains(col, row));
            if inside != self.editors[i].is_hovered() {
                let event = if inside {
                    EditorEvent::MouseEnter
                } else {
                    EditorEvent::MouseLeave
                };
                self.dispatch(i, event);
            }
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let n = self.editors.len();
        if n == 0 {
            return;
        }
        let next = match (self.focused, forward) {
            (Some(i), true) => (i + 1) % n,
            (Some(i), false) => (i + n - 1) % n,
            (None, true) => 0,
            (None, false) => n - 1,
        };
        self.set_focus(Some(next));
    }

    /// Move keyboard focus, sending blur and focus events.
    fn set_focus(&mut self, next: Option<usize>) {
        if self.focused == next {
            return;
        }
        if let Some(prev) = self.focused.take() {
            let field = self.editors[prev].text_field();
            self.doc.blur(field);
            self.dispatch(prev, EditorEvent::Blur);
        }
        if let Some(i) = next {
            let field = self.editors[i].text_field();
            self.doc.focus(field);
            self.focused = Some(i);
            self.dispatch(i, EditorEvent::Focus);
        }
    }

    /// Pick up focus changes made by an editor itself.
    fn sync_focus(&mut self) {
        let focused = self.doc.focused();
        self.focused = self
            .editors
            .iter()
            .position(|e| Some(e.text_field()) == focused);
    }

    fn dispatch(&mut self, index: usize, event: EditorEvent) {
        let Some(editor) = self.editors.get_mut(index) else {
            return;
        };
        match editor.handle_event(&mut self.doc, event) {
            Some(TagAction::Added(tag)) => {
                self.status = Some(format!("Added '{}' to {}", tag, self.labels[index]));
            }
            Some(TagAction::Removed(tag)) => {
                self.status = Some(format!("Removed '{}' from {}", tag, self.labels[index]));
            }
            None => {}
        }
    }

    /// Serialize the form and finish.
    fn submit(&mut self) {
        let pairs = form::collect(&self.doc, self.form);
        let encoded = form::encode(&pairs);
        info!(fields = pairs.len(), "Form submitted");
        self.submission = Some(encoded);
        self.should_quit = true;
    }

    /// Render the application UI.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(1),    // Editors
                Constraint::Length(1), // Status
                Constraint::Length(1), // Help
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        self.render_editors(frame, chunks[1]);

        let status = self.status.as_deref().unwrap_or("");
        frame.render_widget(
            Paragraph::new(status).style(Style::default().fg(Color::Green)),
            chunks[2],
        );
        render_help(frame, chunks[3], HELP);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let title = Paragraph::new(self.title.as_str())
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        frame.render_widget(title, area);
    }

    fn render_editors(&mut self, frame: &mut Frame, area: Rect) {
        self.layouts.clear();
        let mut y = area.y;
        let bottom = area.y + area.height;
        for (i, editor) in self.editors.iter().enumerate() {
            let height = required_height(&self.doc, editor, area.width, area.height)
                .min(bottom.saturating_sub(y));
            let rect = Rect::new(area.x, y, area.width, height);
            let layout = if height > 0 {
                TagEditorView::new(&self.doc, editor, &self.labels[i], &self.theme)
                    .focused(self.focused == Some(i))
                    .render(frame, rect)
            } else {
                EditorLayout::default()
            };
            self.layouts.push(layout);
            y += height;
        }
    }
}

/// Append a form with one input per field to the document body.
fn build_form(doc: &mut Document, fields: &[FieldSpec]) -> NodeId {
    let root = doc.root();
    let form = doc.create_element("form");
    doc.append_child(root, form);

    for field in fields {
        let input = doc.create_element("input");
        doc.set_attribute(input, "type", "text");
        doc.set_attribute(input, "name", &field.name);
        if let Some(id) = &field.id {
            doc.set_attribute(input, "id", id);
        }
        let class = match &field.class {
            Some(extra) => format!("{} {}", FIELD_CLASS, extra),
            None => FIELD_CLASS.to_string(),
        };
        doc.set_attribute(input, "class", &class);
        if let Some(placeholder) = &field.placeholder {
            doc.set_attribute(input, "placeholder", placeholder);
        }
        doc.append_child(form, input);
    }
    form
}

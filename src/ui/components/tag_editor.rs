//! Terminal rendering of a tag editor.
//!
//! Reads the editor's structure back out of the [`Document`] and draws it as
//! a bordered box: the text field on the first row, chips wrapped below it.
//! The border follows the wrapper's active state, and the chip rows follow
//! the tag list's `display` and dimension styles.

use ratatui::{
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::dom::{Document, Host, NodeId};
use crate::editor::{Dimension, TagEditor, LABEL_CLASS, REMOVE_CLASS};
use crate::ui::theme::Theme;

/// Pixel width of one terminal cell, for CSS lengths.
pub const CELL_WIDTH_PX: f64 = 8.0;
/// Pixel height of one terminal cell, for CSS lengths.
pub const CELL_HEIGHT_PX: f64 = 16.0;

/// Prompt drawn before the text field value.
const PROMPT: &str = "› ";

/// A chip as read from the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipView {
    pub text: String,
    /// The chip's remove control.
    pub remove: NodeId,
}

/// Where a chip lands in the chip area, relative to its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipPlacement {
    pub row: u16,
    pub col: u16,
    pub width: u16,
}

/// Screen regions of a rendered editor, used for mouse hit testing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorLayout {
    /// The whole editor box.
    pub wrapper: Rect,
    /// The text field row.
    pub field: Rect,
    /// Clickable remove controls.
    pub remove_controls: Vec<(NodeId, Rect)>,
}

impl EditorLayout {
    /// Whether the point lies inside the editor box.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        rect_contains(self.wrapper, column, row)
    }

    /// Remove control under the point, if any.
    pub fn remove_control_at(&self, column: u16, row: u16) -> Option<NodeId> {
        self.remove_controls
            .iter()
            .find(|(_, r)| rect_contains(*r, column, row))
            .map(|(id, _)| *id)
    }

    /// Whether the point lies on the text field row.
    pub fn field_contains(&self, column: u16, row: u16) -> bool {
        rect_contains(self.field, column, row)
    }
}

fn rect_contains(r: Rect, column: u16, row: u16) -> bool {
    column >= r.x && column < r.x.saturating_add(r.width) && row >= r.y && row < r.y.saturating_add(r.height)
}

/// Read the chips of `editor` from the document.
pub fn chip_views(doc: &Document, editor: &TagEditor) -> Vec<ChipView> {
    editor
        .chips(doc)
        .into_iter()
        .filter_map(|chip| {
            let children = doc.children(chip);
            let label = children.iter().find(|&&c| doc.has_class(c, LABEL_CLASS))?;
            let remove = children.iter().find(|&&c| doc.has_class(c, REMOVE_CLASS))?;
            Some(ChipView {
                text: doc.text_content(*label),
                remove: *remove,
            })
        })
        .collect()
}

/// Display width of a chip: ` text × `.
fn chip_width(text: &str) -> u16 {
    let w = Span::raw(text).width() + 4;
    w.min(u16::MAX as usize) as u16
}

/// Flow chips left to right, wrapping at `width` cells.
///
/// A chip wider than the line gets a line of its own and is clipped.
pub fn layout_chips(chips: &[ChipView], width: u16) -> Vec<ChipPlacement> {
    let mut placements = Vec::with_capacity(chips.len());
    let (mut row, mut col) = (0u16, 0u16);
    for chip in chips {
        let w = chip_width(&chip.text).min(width.max(1));
        if col > 0 && col.saturating_add(w) > width {
            row = row.saturating_add(1);
            col = 0;
        }
        placements.push(ChipPlacement { row, col, width: w });
        col = col.saturating_add(w).saturating_add(1);
    }
    placements
}

/// Number of chip rows to draw, honoring the tag list's height styles.
fn chip_rows(doc: &Document, editor: &TagEditor, needed: u16, available: u16) -> u16 {
    let list = editor.tag_list();
    let dim = |prop: &str| {
        doc.style(list, prop)
            .and_then(|v| Dimension::from(v).to_cells(available, CELL_HEIGHT_PX))
    };
    let mut rows = dim("height").unwrap_or(needed);
    if let Some(max) = dim("max-height") {
        rows = rows.min(max);
    }
    rows.max(1)
}

/// Width of the chip area, honoring the tag list's width style.
fn chip_area_width(doc: &Document, editor: &TagEditor, inner_width: u16) -> u16 {
    doc.style(editor.tag_list(), "width")
        .and_then(|v| Dimension::from(v).to_cells(inner_width, CELL_WIDTH_PX))
        .unwrap_or(inner_width)
        .clamp(1, inner_width.max(1))
}

/// Height the editor needs when drawn `width` cells wide, borders included.
pub fn required_height(doc: &Document, editor: &TagEditor, width: u16, available: u16) -> u16 {
    let inner_width = width.saturating_sub(2);
    let mut height: u16 = 3;
    if editor.is_tag_list_visible(doc) {
        let chips = chip_views(doc, editor);
        let area_width = chip_area_width(doc, editor, inner_width);
        let needed = layout_chips(&chips, area_width)
            .last()
            .map(|p| p.row.saturating_add(1))
            .unwrap_or(1);
        height = height.saturating_add(chip_rows(doc, editor, needed, available));
    }
    height
}

/// Draws one tag editor.
pub struct TagEditorView<'a> {
    doc: &'a Document,
    editor: &'a TagEditor,
    label: &'a str,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> TagEditorView<'a> {
    pub fn new(doc: &'a Document, editor: &'a TagEditor, label: &'a str, theme: &'a Theme) -> Self {
        Self {
            doc,
            editor,
            label,
            theme,
            focused: false,
        }
    }

    /// Whether the editor's text field holds keyboard focus.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Render into `area` and return the regions for hit testing.
    pub fn render(&self, frame: &mut Frame, area: Rect) -> EditorLayout {
        let active = self.editor.is_active(self.doc);
        let block = Block::default()
            .title(format!(" {} ", self.label))
            .borders(Borders::ALL)
            .border_style(self.theme.border(active));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut layout = EditorLayout {
            wrapper: area,
            ..Default::default()
        };
        if inner.height == 0 || inner.width == 0 {
            return layout;
        }

        let field = Rect::new(inner.x, inner.y, inner.width, 1);
        self.render_field(frame, field);
        layout.field = field;

        if self.editor.is_tag_list_visible(self.doc) && inner.height > 1 {
            let chips_area = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 1);
            layout.remove_controls = self.render_chips(frame, chips_area);
        }

        layout
    }

    fn render_field(&self, frame: &mut Frame, area: Rect) {
        let value = self.editor.input_value(self.doc);
        let placeholder = self
            .doc
            .attribute(self.editor.text_field(), "placeholder")
            .unwrap_or_default();

        let mut spans = vec![Span::styled(PROMPT, self.theme.border(self.focused))];
        if value.is_empty() && !placeholder.is_empty() {
            spans.push(Span::styled(placeholder.to_string(), self.theme.placeholder()));
        } else {
            spans.push(Span::styled(value.to_string(), self.theme.text()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);

        if self.focused {
            let before: String = value.chars().take(self.editor.caret()).collect();
            let offset = Span::raw(PROMPT).width() + Span::raw(before).width();
            let x = area.x.saturating_add(offset.min(u16::MAX as usize) as u16);
            if x < area.x + area.width {
                frame.set_cursor_position(Position::new(x, area.y));
            }
        }
    }

    fn render_chips(&self, frame: &mut Frame, area: Rect) -> Vec<(NodeId, Rect)> {
        let chips = chip_views(self.doc, self.editor);
        let width = chip_area_width(self.doc, self.editor, area.width);
        let placements = layout_chips(&chips, width);
        let rows = chip_rows(self.doc, self.editor, area.height, area.height).min(area.height);

        let mut lines: Vec<Vec<Span>> = vec![Vec::new(); rows as usize];
        let mut controls = Vec::new();
        let mut hidden = 0usize;
        for (chip, place) in chips.iter().zip(&placements) {
            if place.row >= rows {
                hidden += 1;
                continue;
            }
            let line = &mut lines[place.row as usize];
            let used: usize = line.iter().map(|s| s.width()).sum();
            if (place.col as usize) > used {
                line.push(Span::raw(" ".repeat(place.col as usize - used)));
            }
            let start = used.max(place.col as usize);
            let label_width = place.width.saturating_sub(4) as usize;
            let label = Span::styled(format!(" {} ", clip(&chip.text, label_width)), self.theme.chip());
            // Wide characters may clip short of the placement width.
            let offset = start + label.width();
            line.push(label);
            line.push(Span::styled("× ", self.theme.remove_control()));

            if offset < width as usize {
                let remove_x = area.x + offset as u16;
                controls.push((chip.remove, Rect::new(remove_x, area.y + place.row, 1, 1)));
            }
        }

        if hidden > 0 {
            if let Some(last) = lines.last_mut() {
                last.push(Span::styled(format!(" +{}", hidden), self.theme.placeholder()));
            }
        }

        let text: Vec<Line> = lines.into_iter().map(Line::from).collect();
        let chips_rect = Rect::new(area.x, area.y, width.min(area.width), rows);
        frame.render_widget(Paragraph::new(text), chips_rect);
        controls
    }
}

/// Clip `s` to at most `width` display cells.
fn clip(s: &str, width: usize) -> String {
    let mut out = String::new();
    for c in s.chars() {
        let mut next = out.clone();
        next.push(c);
        if Span::raw(next.as_str()).width() > width {
            break;
        }
        out = next;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{EditorConfig, EditorEvent};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn chip(text: &str, id: u32) -> ChipView {
        ChipView {
            text: text.to_string(),
            remove: NodeId(id),
        }
    }

    fn setup(config: EditorConfig, tags: &[&str]) -> (Document, TagEditor) {
        let mut doc = Document::new();
        let root = doc.root();
        let input = doc.element("input", &[("name", "tags"), ("placeholder", "Add a tag")]);
        doc.append_child(root, input);
        let mut editor = TagEditor::new(&mut doc, input, config);
        for tag in tags {
            doc.set_value(editor.text_field(), tag);
            editor.handle_event(
                &mut doc,
                EditorEvent::KeyPress(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
            );
        }
        (doc, editor)
    }

    fn draw(doc: &Document, editor: &TagEditor, width: u16, height: u16) -> (EditorLayout, String) {
        let theme = Theme::default();
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut layout = EditorLayout::default();
        terminal
            .draw(|frame| {
                let area = frame.area();
                layout = TagEditorView::new(doc, editor, "Tags", &theme)
                    .focused(true)
                    .render(frame, area);
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for row in buffer.content.chunks(width as usize) {
            for cell in row {
                text.push_str(cell.symbol());
            }
            text.push('\n');
        }
        (layout, text)
    }

    #[test]
    fn test_layout_chips_wraps() {
        let chips = vec![chip("red", 1), chip("green", 2), chip("blue", 3)];
        // widths: 7, 9, 8
        let placements = layout_chips(&chips, 18);
        assert_eq!(placements[0], ChipPlacement { row: 0, col: 0, width: 7 });
        assert_eq!(placements[1], ChipPlacement { row: 0, col: 8, width: 9 });
        assert_eq!(placements[2], ChipPlacement { row: 1, col: 0, width: 8 });
    }

    #[test]
    fn test_layout_chips_clips_wide_chip() {
        let chips = vec![chip("a-very-long-tag-name", 1)];
        let placements = layout_chips(&chips, 10);
        assert_eq!(placements[0].width, 10);
    }

    #[test]
    fn test_required_height_without_tags() {
        let (doc, editor) = setup(EditorConfig::default(), &[]);
        assert_eq!(required_height(&doc, &editor, 40, 20), 3);
    }

    #[test]
    fn test_required_height_grows_with_chips() {
        let (doc, editor) = setup(EditorConfig::default(), &["red", "green", "blue"]);
        assert_eq!(required_height(&doc, &editor, 40, 20), 4);
        assert_eq!(required_height(&doc, &editor, 20, 20), 5);
    }

    #[test]
    fn test_required_height_respects_max_height() {
        let config = EditorConfig {
            max_height: Some(16u32.into()),
            ..Default::default()
        };
        let (doc, editor) = setup(config, &["red", "green", "blue"]);
        assert_eq!(required_height(&doc, &editor, 20, 20), 4);
    }

    #[test]
    fn test_render_placeholder_and_chips() {
        let (doc, editor) = setup(EditorConfig::default(), &[]);
        let (_, text) = draw(&doc, &editor, 30, 3);
        assert!(text.contains("Add a tag"));
        assert!(text.contains("Tags"));

        let (doc, editor) = setup(EditorConfig::default(), &["red", "blue"]);
        let (layout, text) = draw(&doc, &editor, 30, 4);
        assert!(text.contains(" red × "));
        assert!(text.contains(" blue × "));
        assert_eq!(layout.remove_controls.len(), 2);
    }

    #[test]
    fn test_remove_control_hit_testing() {
        let (doc, editor) = setup(EditorConfig::default(), &["red"]);
        let (layout, _) = draw(&doc, &editor, 30, 4);
        let chips = chip_views(&doc, &editor);

        // Border at x=0, chip " red × " starts at x=1, so × is at x=6, row 2.
        assert_eq!(layout.remove_control_at(6, 2), Some(chips[0].remove));
        assert_eq!(layout.remove_control_at(5, 2), None);
        assert!(layout.field_contains(3, 1));
        assert!(layout.contains(0, 0));
        assert!(!layout.contains(30, 0));
    }

    #[test]
    fn test_remove_control_follows_clipped_wide_label() {
        let (doc, editor) = setup(EditorConfig::default(), &["日本語日本語日本語"]);
        let width = 13;
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(width, 4)).unwrap();
        let mut layout = EditorLayout::default();
        terminal
            .draw(|frame| {
                layout = TagEditorView::new(&doc, &editor, "Tags", &theme).render(frame, frame.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row = &buffer.content[2 * width as usize..3 * width as usize];
        let drawn_x = row.iter().position(|cell| cell.symbol() == "×").unwrap() as u16;

        let (remove, rect) = layout.remove_controls[0];
        assert_eq!(rect.x, drawn_x);
        assert_eq!(layout.remove_control_at(drawn_x, 2), Some(remove));
    }

    #[test]
    fn test_layout_chips_many_rows_saturates() {
        let chips: Vec<ChipView> = (0..70_000).map(|i| chip("t", i)).collect();
        let placements = layout_chips(&chips, 1);
        assert_eq!(placements.last().map(|p| p.row), Some(u16::MAX));
    }

    #[test]
    fn test_overflow_indicator() {
        let config = EditorConfig {
            max_height: Some(16u32.into()),
            ..Default::default()
        };
        let (doc, editor) = setup(config, &["red", "green", "blue", "cyan"]);
        let (layout, text) = draw(&doc, &editor, 24, 4);
        assert!(text.contains("+2"));
        assert_eq!(layout.remove_controls.len(), 2);
    }

    #[test]
    fn test_field_value_uses_text_color() {
        let (mut doc, editor) = setup(EditorConfig::default(), &[]);
        doc.set_value(editor.text_field(), "red");
        let theme = Theme {
            fg: ratatui::style::Color::Magenta,
            ..Theme::default()
        };
        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();
        terminal
            .draw(|frame| {
                TagEditorView::new(&doc, &editor, "Tags", &theme).render(frame, frame.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        // Border, then the two-cell prompt, then the value.
        let cell = &buffer.content[20 + 3];
        assert_eq!(cell.symbol(), "r");
        assert_eq!(cell.fg, ratatui::style::Color::Magenta);
    }

    #[test]
    fn test_clip() {
        assert_eq!(clip("hello", 3), "hel");
        assert_eq!(clip("hi", 5), "hi");
    }
}

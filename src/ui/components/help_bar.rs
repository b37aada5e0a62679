//! Help bar component.
//!
//! Displays keyboard shortcut hints at the bottom of the screen.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render a help bar.
///
/// `hints` is plain text where keys are written in brackets, e.g.
/// `"[Enter] add tag  [Tab] next field"`.
pub fn render_help(frame: &mut Frame, area: Rect, hints: &str) {
    let line = Line::from(parse_hints_to_spans(hints));
    frame.render_widget(Paragraph::new(line), area);
}

/// Split hint text into key spans (bracketed) and description spans.
fn parse_hints_to_spans(hints: &str) -> Vec<Span<'static>> {
    let key_style = Style::default().fg(Color::Cyan);
    let text_style = Style::default().fg(Color::DarkGray);

    let mut spans = Vec::new();
    let mut rest = hints;
    while !rest.is_empty() {
        match rest.find('[') {
            Some(0) => {
                let end = rest.find(']').map(|i| i + 1).unwrap_or(rest.len());
                spans.push(Span::styled(rest[..end].to_string(), key_style));
                rest = &rest[end..];
            }
            Some(start) => {
                spans.push(Span::styled(rest[..start].to_string(), text_style));
                rest = &rest[start..];
            }
            None => {
                spans.push(Span::styled(rest.to_string(), text_style));
                rest = "";
            }
        }
    }
    spans
}

//! Single-line text field editing.
//!
//! The field's value lives in the host document; this module only tracks the
//! caret and applies native-input style edits to a value string.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Outcome of feeding a key to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEdit {
    /// The value changed.
    Changed,
    /// Only the caret moved.
    Moved,
    /// The key is not a text-editing key.
    Ignored,
}

/// Caret state for a text field.
///
/// The caret is a char index, so multi-byte input never splits a code point.
#[derive(Debug, Clone, Default)]
pub struct TextCaret {
    pos: usize,
}

impl TextCaret {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caret position in chars.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move the caret to the end of `value`.
    pub fn move_to_end(&mut self, value: &str) {
        self.pos = value.chars().count();
    }

    pub fn reset(&mut self) {
        self.pos = 0;
    }

    /// Apply a key to `value`.
    pub fn handle_input(&mut self, value: &mut String, key: KeyEvent) -> FieldEdit {
        let len = value.chars().count();
        self.pos = self.pos.min(len);

        match (key.code, key.modifiers) {
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                if value.is_empty() {
                    return FieldEdit::Ignored;
                }
                value.clear();
                self.pos = 0;
                FieldEdit::Changed
            }
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
                if self.pos == 0 {
                    return FieldEdit::Ignored;
                }
                let chars: Vec<char> = value.chars().collect();
                let mut start = self.pos;
                while start > 0 && chars[start - 1].is_whitespace() {
                    start -= 1;
                }
                while start > 0 && !chars[start - 1].is_whitespace() {
                    start -= 1;
                }
                let range = byte_offset(value, start)..byte_offset(value, self.pos);
                value.replace_range(range, "");
                self.pos = start;
                FieldEdit::Changed
            }
            (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.pos = 0;
                FieldEdit::Moved
            }
            (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.pos = len;
                FieldEdit::Moved
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                value.insert(byte_offset(value, self.pos), c);
                self.pos += 1;
                FieldEdit::Changed
            }
            (KeyCode::Backspace, _) => {
                if self.pos == 0 {
                    return FieldEdit::Ignored;
                }
                self.pos -= 1;
                value.remove(byte_offset(value, self.pos));
                FieldEdit::Changed
            }
            (KeyCode::Delete, _) => {
                if self.pos >= len {
                    return FieldEdit::Ignored;
                }
                value.remove(byte_offset(value, self.pos));
                FieldEdit::Changed
            }
            (KeyCode::Left, _) => {
                self.pos = self.pos.saturating_sub(1);
                FieldEdit::Moved
            }
            (KeyCode::Right, _) => {
                self.pos = (self.pos + 1).min(len);
                FieldEdit::Moved
            }
            (KeyCode::Home, _) => {
                self.pos = 0;
                FieldEdit::Moved
            }
            (KeyCode::End, _) => {
                self.pos = len;
                FieldEdit::Moved
            }
            _ => FieldEdit::Ignored,
        }
    }
}

fn byte_offset(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(caret: &mut TextCaret, value: &mut String, s: &str) {
        for c in s.chars() {
            caret.handle_input(value, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_character_input() {
        let mut caret = TextCaret::new();
        let mut value = String::new();
        type_str(&mut caret, &mut value, "red");
        assert_eq!(value, "red");
        assert_eq!(caret.position(), 3);
    }

    #[test]
    fn test_shift_character_input() {
        let mut caret = TextCaret::new();
        let mut value = String::new();
        let edit = caret.handle_input(
            &mut value,
            KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT),
        );
        assert_eq!(edit, FieldEdit::Changed);
        assert_eq!(value, "R");
    }

    #[test]
    fn test_backspace() {
        let mut caret = TextCaret::new();
        let mut value = String::new();
        type_str(&mut caret, &mut value, "abc");
        assert_eq!(caret.handle_input(&mut value, key(KeyCode::Backspace)), FieldEdit::Changed);
        assert_eq!(value, "ab");
    }

    #[test]
    fn test_backspace_at_start() {
        let mut caret = TextCaret::new();
        let mut value = "abc".to_string();
        assert_eq!(caret.handle_input(&mut value, key(KeyCode::Backspace)), FieldEdit::Ignored);
        assert_eq!(value, "abc");
    }

    #[test]
    fn test_delete_at_caret() {
        let mut caret = TextCaret::new();
        let mut value = "abc".to_string();
        caret.handle_input(&mut value, key(KeyCode::Delete));
        assert_eq!(value, "bc");
        caret.move_to_end(&value);
        assert_eq!(caret.handle_input(&mut value, key(KeyCode::Delete)), FieldEdit::Ignored);
    }

    #[test]
    fn test_insert_in_middle() {
        let mut caret = TextCaret::new();
        let mut value = "ac".to_string();
        caret.move_to_end(&value);
        caret.handle_input(&mut value, key(KeyCode::Left));
        caret.handle_input(&mut value, key(KeyCode::Char('b')));
        assert_eq!(value, "abc");
        assert_eq!(caret.position(), 2);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut caret = TextCaret::new();
        let mut value = String::new();
        type_str(&mut caret, &mut value, "héé");
        caret.handle_input(&mut value, key(KeyCode::Left));
        caret.handle_input(&mut value, key(KeyCode::Backspace));
        assert_eq!(value, "hé");
        assert_eq!(caret.position(), 1);
    }

    #[test]
    fn test_home_end() {
        let mut caret = TextCaret::new();
        let mut value = "abc".to_string();
        caret.handle_input(&mut value, key(KeyCode::End));
        assert_eq!(caret.position(), 3);
        caret.handle_input(&mut value, key(KeyCode::Home));
        assert_eq!(caret.position(), 0);
        caret.handle_input(&mut value, ctrl('e'));
        assert_eq!(caret.position(), 3);
        caret.handle_input(&mut value, ctrl('a'));
        assert_eq!(caret.position(), 0);
    }

    #[test]
    fn test_ctrl_u_clear() {
        let mut caret = TextCaret::new();
        let mut value = String::new();
        type_str(&mut caret, &mut value, "hello");
        assert_eq!(caret.handle_input(&mut value, ctrl('u')), FieldEdit::Changed);
        assert!(value.is_empty());
        assert_eq!(caret.position(), 0);
        assert_eq!(caret.handle_input(&mut value, ctrl('u')), FieldEdit::Ignored);
    }

    #[test]
    fn test_ctrl_w_delete_word() {
        let mut caret = TextCaret::new();
        let mut value = String::new();
        type_str(&mut caret, &mut value, "hello world ");
        caret.handle_input(&mut value, ctrl('w'));
        assert_eq!(value, "hello ");
        assert_eq!(caret.position(), 6);
    }

    #[test]
    fn test_caret_clamped_after_external_change() {
        let mut caret = TextCaret::new();
        let mut value = "abcdef".to_string();
        caret.move_to_end(&value);
        value.truncate(2);
        caret.handle_input(&mut value, key(KeyCode::Char('x')));
        assert_eq!(value, "abx");
    }

    #[test]
    fn test_enter_is_ignored() {
        let mut caret = TextCaret::new();
        let mut value = "abc".to_string();
        assert_eq!(caret.handle_input(&mut value, key(KeyCode::Enter)), FieldEdit::Ignored);
    }
}

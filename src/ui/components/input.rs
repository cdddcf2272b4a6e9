//! Text input component.
//!
//! A single-line text input with cursor movement, used for the per-column
//! filter editor. Editing is modal: while an input has focus, all
//! character keys go to it; the caller decides when focus ends (Enter or
//! Esc).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::theme;

/// A text input widget.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// The current input value.
    value: String,
    /// Cursor position within the value, in bytes (ASCII input only).
    cursor: usize,
    /// Placeholder text shown when empty.
    placeholder: String,
}

impl TextInput {
    /// Create a new empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new input with an initial value, cursor at the end.
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        Self {
            value,
            cursor,
            placeholder: String::new(),
        }
    }

    /// Set the placeholder text.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    /// Get the current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the value and move the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
    }

    /// Clear the input.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Check if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Get the cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Handle keyboard input.
    ///
    /// Returns true if the value was modified.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            // Character input
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.value.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                true
            }
            // Backspace - delete character before cursor
            (KeyCode::Backspace, _) => {
                if self.cursor > 0 {
                    let prev = prev_boundary(&self.value, self.cursor);
                    self.value.remove(prev);
                    self.cursor = prev;
                    true
                } else {
                    false
                }
            }
            // Delete - delete character at cursor
            (KeyCode::Delete, _) => {
                if self.cursor < self.value.len() {
                    self.value.remove(self.cursor);
                    true
                } else {
                    false
                }
            }
            (KeyCode::Left, KeyModifiers::NONE) => {
                if self.cursor > 0 {
                    self.cursor = prev_boundary(&self.value, self.cursor);
                }
                false
            }
            (KeyCode::Right, KeyModifiers::NONE) => {
                if self.cursor < self.value.len() {
                    self.cursor = next_boundary(&self.value, self.cursor);
                }
                false
            }
            (KeyCode::Home, _) => {
                self.cursor = 0;
                false
            }
            (KeyCode::End, _) => {
                self.cursor = self.value.len();
                false
            }
            // Ctrl+U - clear line
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                if self.value.is_empty() {
                    false
                } else {
                    self.clear();
                    true
                }
            }
            _ => false,
        }
    }

    /// Render the input as a single line with a label prefix.
    ///
    /// The terminal cursor is placed at the edit position while focused.
    pub fn render(&self, frame: &mut Frame, area: Rect, label: &str, focused: bool) {
        let theme = theme();

        let value_span = if self.value.is_empty() && !self.placeholder.is_empty() {
            Span::styled(self.placeholder.clone(), Style::default().fg(theme.muted))
        } else {
            Span::styled(self.value.clone(), Style::default().fg(theme.fg))
        };

        let line = Line::from(vec![
            Span::styled(
                format!("{}: ", label),
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD),
            ),
            value_span,
        ]);

        frame.render_widget(Paragraph::new(line), area);

        if focused {
            let prefix = label.len() as u16 + 2;
            let chars_before = self.value[..self.cursor].chars().count() as u16;
            let x = (area.x + prefix + chars_before).min(area.right().saturating_sub(1));
            frame.set_cursor_position(Position::new(x, area.y));
        }
    }
}

fn prev_boundary(value: &str, cursor: usize) -> usize {
    let mut i = cursor - 1;
    while i > 0 && !value.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn next_boundary(value: &str, cursor: usize) -> usize {
    let mut i = cursor + 1;
    while i < value.len() && !value.is_char_boundary(i) {
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_appends() {
        let mut input = TextInput::new();
        assert!(input.handle_input(key(KeyCode::Char('a'))));
        assert!(input.handle_input(key(KeyCode::Char('b'))));
        assert_eq!(input.value(), "ab");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_insert_at_cursor() {
        let mut input = TextInput::with_value("ac");
        input.handle_input(key(KeyCode::Left));
        input.handle_input(key(KeyCode::Char('b')));
        assert_eq!(input.value(), "abc");
    }

    #[test]
    fn test_backspace() {
        let mut input = TextInput::with_value("ab");
        assert!(input.handle_input(key(KeyCode::Backspace)));
        assert_eq!(input.value(), "a");

        input.clear();
        assert!(!input.handle_input(key(KeyCode::Backspace)));
    }

    #[test]
    fn test_delete_at_cursor() {
        let mut input = TextInput::with_value("ab");
        input.handle_input(key(KeyCode::Home));
        assert!(input.handle_input(key(KeyCode::Delete)));
        assert_eq!(input.value(), "b");
    }

    #[test]
    fn test_cursor_movement_does_not_modify() {
        let mut input = TextInput::with_value("abc");
        assert!(!input.handle_input(key(KeyCode::Left)));
        assert!(!input.handle_input(key(KeyCode::Home)));
        assert!(!input.handle_input(key(KeyCode::End)));
        assert_eq!(input.value(), "abc");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut input = TextInput::with_value("abc");
        let event = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert!(input.handle_input(event));
        assert!(input.is_empty());
    }

    #[test]
    fn test_set_value_moves_cursor_to_end() {
        let mut input = TextInput::new();
        input.set_value("hello");
        assert_eq!(input.cursor(), 5);
    }
}

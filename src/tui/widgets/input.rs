//! Text input widget
//!
//! A single-line text field with a cursor. Numeric fields drop the
//! characters a cell never accepts, both when typed and when pasted.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::services::input::{accepts_numeric_char, sanitize_numeric_input};

/// A simple text input widget
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// Current text content
    pub content: String,
    /// Cursor position, in characters
    pub cursor: usize,
    /// Whether the input is focused
    pub focused: bool,
    /// Placeholder text
    pub placeholder: String,
    /// Label
    pub label: String,
    /// Only accept characters valid in a numeric cell
    pub numeric: bool,
}

impl TextInput {
    /// Create a new text input
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input that filters out exponent markers and minus signs
    pub fn numeric() -> Self {
        Self {
            numeric: true,
            ..Self::default()
        }
    }

    /// Set the label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the placeholder
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set focused state
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set content
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.set_content(content);
        self
    }

    /// Replace the content and move the cursor to the end
    pub fn set_content(&mut self, content: impl Into<String>) {
        let content = content.into();
        self.content = if self.numeric {
            sanitize_numeric_input(&content)
        } else {
            content
        };
        self.cursor = self.char_count();
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.content
            .char_indices()
            .nth(cursor)
            .map_or(self.content.len(), |(i, _)| i)
    }

    /// Insert a character at the cursor; returns false if it was rejected
    pub fn insert(&mut self, c: char) -> bool {
        if c.is_control() || (self.numeric && !accepts_numeric_char(c)) {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
        true
    }

    /// Insert pasted text at the cursor
    pub fn insert_str(&mut self, text: &str) {
        let text: String = if self.numeric {
            sanitize_numeric_input(text)
        } else {
            text.to_string()
        };
        for c in text.chars().filter(|c| !c.is_control()) {
            self.insert(c);
        }
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Move cursor left
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right
    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start
    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end
    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Clear the content
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Get the current content
    pub fn value(&self) -> &str {
        &self.content
    }

    /// Styled spans for the value with the cursor drawn as a block
    pub fn spans(&self, value_style: Style) -> Vec<Span<'static>> {
        if !self.focused {
            let text = if self.content.is_empty() {
                self.placeholder.clone()
            } else {
                self.content.clone()
            };
            let style = if self.content.is_empty() {
                Style::default().fg(Color::DarkGray)
            } else {
                value_style
            };
            return vec![Span::styled(text, style)];
        }

        let split = self.byte_index(self.cursor);
        let (before, after) = self.content.split_at(split);
        let mut rest = after.chars();
        let cursor_char = rest.next().unwrap_or(' ');

        vec![
            Span::styled(before.to_string(), value_style),
            Span::styled(
                cursor_char.to_string(),
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ),
            Span::styled(rest.as_str().to_string(), value_style),
        ]
    }
}

impl Widget for &TextInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();
        if !self.label.is_empty() {
            let label_style = if self.focused {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Yellow)
            };
            spans.push(Span::styled(format!("{}: ", self.label), label_style));
        }
        spans.extend(self.spans(Style::default().fg(Color::White)));
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_edit() {
        let mut input = TextInput::new();
        for c in "Rent".chars() {
            input.insert(c);
        }
        input.move_left();
        input.backspace();
        assert_eq!(input.value(), "Ret");
        input.move_start();
        input.delete();
        assert_eq!(input.value(), "et");
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn test_numeric_rejects_exponent_and_minus() {
        let mut input = TextInput::numeric();
        assert!(input.insert('1'));
        assert!(!input.insert('e'));
        assert!(!input.insert('-'));
        assert!(input.insert('.'));
        assert!(input.insert('5'));
        assert_eq!(input.value(), "1.5");
    }

    #[test]
    fn test_numeric_paste_is_sanitized() {
        let mut input = TextInput::numeric();
        input.insert_str("-2E3\n");
        assert_eq!(input.value(), "23");

        let mut input = TextInput::numeric().content("-12e4");
        assert_eq!(input.value(), "124");
        input.insert_str("0");
        assert_eq!(input.value(), "1240");
    }

    #[test]
    fn test_multibyte_cursor() {
        let mut input = TextInput::new().content("Café");
        input.move_left();
        input.insert('x');
        assert_eq!(input.value(), "Cafxé");
        input.move_end();
        input.backspace();
        assert_eq!(input.value(), "Cafx");
    }

    #[test]
    fn test_focused_spans_show_cursor() {
        let input = TextInput::new().content("ab").focused(true);
        let spans = input.spans(Style::default());
        assert_eq!(spans[0].content, "ab");
        assert_eq!(spans[1].content, " ");
    }
}

//! Single-line text input widget.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Prompt drawn in front of the input.
const PROMPT: &str = "> ";

/// A single-line text input widget.
#[derive(Debug, Clone)]
pub struct TextInput<'a> {
    /// The text content.
    content: &'a str,
    /// Cursor position (character index).
    cursor: usize,
    /// Whether the input is focused.
    focused: bool,
    /// Placeholder text.
    placeholder: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> TextInput<'a> {
    /// Create a new text input.
    pub fn new(content: &'a str, cursor: usize, theme: &'a Theme) -> Self {
        Self {
            content,
            cursor,
            focused: true,
            placeholder: None,
            theme,
        }
    }

    /// Set focus state.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set placeholder text.
    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 1 {
            return;
        }

        let prompt_style = Style::default().fg(self.theme.primary);
        let text_style = Style::default().fg(self.theme.text);
        let mut spans = vec![Span::styled(PROMPT, prompt_style)];

        // Show placeholder if empty
        if self.content.is_empty() {
            if self.focused {
                spans.push(Span::styled("_", text_style));
            }
            if let Some(placeholder) = self.placeholder {
                spans.push(Span::styled(
                    placeholder,
                    Style::default().fg(self.theme.muted),
                ));
            }
            Paragraph::new(Line::from(spans)).render(area, buf);
            return;
        }

        // Keep the cursor visible by showing the tail of long input
        let available = (area.width as usize).saturating_sub(PROMPT.len() + 1).max(1);
        let start = self.cursor.saturating_sub(available);

        let mut visible = String::new();
        let mut cursor_drawn = false;
        for (index, ch) in self.content.chars().enumerate().skip(start) {
            if self.focused && index == self.cursor {
                visible.push('|');
                cursor_drawn = true;
            }
            visible.push(ch);
        }
        if self.focused && !cursor_drawn {
            visible.push('_');
        }

        spans.push(Span::styled(visible, text_style));
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// State for a text input, managing content and cursor position.
#[derive(Debug, Clone)]
pub struct TextInputState {
    /// The text content.
    content: String,
    /// Cursor position (character index).
    cursor: usize,
    /// Input history for recall.
    history: Vec<String>,
    /// Current history index (`None` = editing fresh input).
    history_index: Option<usize>,
    /// Saved current input when navigating history.
    saved_input: String,
}

impl Default for TextInputState {
    fn default() -> Self {
        Self::new()
    }
}

impl TextInputState {
    /// Create a new empty text input state.
    pub fn new() -> Self {
        Self {
            content: String::new(),
            cursor: 0,
            history: Vec::new(),
            history_index: None,
            saved_input: String::new(),
        }
    }

    /// Get the current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor position as a character index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Check if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Byte offset of a character index.
    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map_or(self.content.len(), |(i, _)| i)
    }

    /// Clear the content.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Insert a character at the cursor position. Newlines are dropped.
    pub fn insert(&mut self, ch: char) {
        if ch == '\n' || ch == '\r' {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.content.insert(at, ch);
        self.cursor += 1;
    }

    /// Insert a string at the cursor position.
    pub fn insert_str(&mut self, s: &str) {
        for ch in s.chars() {
            self.insert(ch);
        }
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete the character at the cursor (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Move cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Take the content into history and clear.
    pub fn submit(&mut self) -> String {
        let content = std::mem::take(&mut self.content);
        self.cursor = 0;
        if !content.trim().is_empty() {
            self.history.push(content.clone());
        }
        self.history_index = None;
        self.saved_input.clear();
        content
    }

    /// Navigate to previous history entry.
    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }

        let next = match self.history_index {
            None => {
                self.saved_input = self.content.clone();
                0
            }
            Some(i) if i + 1 < self.history.len() => i + 1,
            Some(_) => return,
        };

        self.history_index = Some(next);
        self.content = self.history[self.history.len() - 1 - next].clone();
        self.move_end();
    }

    /// Navigate to next history entry.
    pub fn history_next(&mut self) {
        match self.history_index {
            None => {}
            Some(0) => {
                self.history_index = None;
                self.content = std::mem::take(&mut self.saved_input);
                self.move_end();
            }
            Some(i) => {
                self.history_index = Some(i - 1);
                self.content = self.history[self.history.len() - i].clone();
                self.move_end();
            }
        }
    }

    /// Create a widget from this state.
    pub fn widget<'a>(&'a self, theme: &'a Theme) -> TextInput<'a> {
        TextInput::new(self.content(), self.cursor(), theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(widget: TextInput<'_>, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buf.content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn test_text_input_state_basic() {
        let mut state = TextInputState::new();
        assert!(state.is_empty());

        state.insert('H');
        state.insert('i');
        assert_eq!(state.content(), "Hi");
        assert_eq!(state.cursor(), 2);

        state.backspace();
        assert_eq!(state.content(), "H");

        state.clear();
        assert!(state.is_empty());
    }

    #[test]
    fn test_text_input_state_cursor_movement() {
        let mut state = TextInputState::new();
        state.insert_str("Hello");

        state.move_left();
        state.move_left();
        assert_eq!(state.cursor(), 3);

        state.insert('X');
        assert_eq!(state.content(), "HelXlo");

        state.move_home();
        assert_eq!(state.cursor(), 0);
        state.delete();
        assert_eq!(state.content(), "elXlo");

        state.move_end();
        assert_eq!(state.cursor(), 5);
    }

    #[test]
    fn test_text_input_state_multibyte() {
        let mut state = TextInputState::new();
        state.insert_str("héllo");
        state.move_left();
        state.move_left();
        state.move_left();
        state.backspace();
        assert_eq!(state.content(), "hllo");
        state.insert('é');
        assert_eq!(state.content(), "héllo");
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn test_newlines_are_dropped() {
        let mut state = TextInputState::new();
        state.insert_str("a\nb\r");
        assert_eq!(state.content(), "ab");
    }

    #[test]
    fn test_text_input_state_history() {
        let mut state = TextInputState::new();

        state.insert_str("first");
        assert_eq!(state.submit(), "first");
        assert!(state.is_empty());

        state.insert_str("second");
        state.submit();

        state.insert_str("draft");
        state.history_prev();
        assert_eq!(state.content(), "second");

        state.history_prev();
        assert_eq!(state.content(), "first");

        // Stops at the oldest entry
        state.history_prev();
        assert_eq!(state.content(), "first");

        state.history_next();
        assert_eq!(state.content(), "second");

        state.history_next();
        assert_eq!(state.content(), "draft");
        assert_eq!(state.cursor(), 5);
    }

    #[test]
    fn test_blank_submit_not_in_history() {
        let mut state = TextInputState::new();
        state.insert_str("   ");
        state.submit();
        state.history_prev();
        assert!(state.is_empty());
    }

    #[test]
    fn test_widget_placeholder() {
        let theme = Theme::default();
        let state = TextInputState::new();
        let out = render(state.widget(&theme).placeholder("Ask a question..."), 30);
        assert_eq!(out, "> _Ask a question...");
    }

    #[test]
    fn test_widget_cursor_positions() {
        let theme = Theme::default();
        let mut state = TextInputState::new();
        state.insert_str("abc");
        assert_eq!(render(state.widget(&theme), 20), "> abc_");

        state.move_left();
        assert_eq!(render(state.widget(&theme), 20), "> ab|c");
    }

    #[test]
    fn test_widget_scrolls_long_input() {
        let theme = Theme::default();
        let mut state = TextInputState::new();
        state.insert_str("abcdefghij");
        // width 8: prompt (2) + 5 chars + cursor
        assert_eq!(render(state.widget(&theme), 8), "> fghij_");
    }
}

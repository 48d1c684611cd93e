//! Message list widget.
//!
//! Renders the transcript as bubbles: assistant messages on the left, user
//! messages on the right. When the rows do not fit, the bottom of the
//! visible part is shown.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};
use textwrap::{Options, WordSeparator, WrapAlgorithm};
use unicode_width::UnicodeWidthStr;

use helpdesk_engine::{Message, Sender};

use crate::theme::Theme;

/// Shown under the transcript while a reply is pending.
const TYPING_INDICATOR: &str = " Assistant is typing...";

/// One rendered line of the transcript.
struct Row {
    indent: u16,
    text: String,
    style: Style,
}

impl Row {
    fn spacer() -> Self {
        Self {
            indent: 0,
            text: String::new(),
            style: Style::default(),
        }
    }
}

/// Transcript widget.
///
/// ```text
///  Welcome to AI Helpdesk! How
///  can I assist you today?
///
///                        Hello
///
///  Hi there! What information
///  do you need?
/// ```
pub struct MessageList<'a> {
    messages: &'a [Message],
    theme: &'a Theme,
    scroll_back: usize,
    typing: bool,
}

impl<'a> MessageList<'a> {
    /// Create a new message list.
    pub fn new(messages: &'a [Message], theme: &'a Theme) -> Self {
        Self {
            messages,
            theme,
            scroll_back: 0,
            typing: false,
        }
    }

    /// Hide this many of the newest messages.
    #[must_use]
    pub fn scroll_back(mut self, scroll_back: usize) -> Self {
        self.scroll_back = scroll_back;
        self
    }

    /// Show the typing indicator (only while following the bottom).
    #[must_use]
    pub fn typing(mut self, typing: bool) -> Self {
        self.typing = typing;
        self
    }

    fn bubble_style(&self, sender: Sender) -> Style {
        match sender {
            Sender::User => Style::default()
                .fg(self.theme.user_text)
                .bg(self.theme.user_bubble),
            Sender::Ai => Style::default()
                .fg(self.theme.ai_text)
                .bg(self.theme.ai_bubble),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn rows(&self, width: u16) -> Vec<Row> {
        let max_text = (usize::from(width) * 3 / 4).saturating_sub(2).max(1);
        let options = Options::new(max_text)
            .wrap_algorithm(WrapAlgorithm::FirstFit)
            .word_separator(WordSeparator::AsciiSpace);

        let shown = self
            .messages
            .len()
            .saturating_sub(self.scroll_back.min(self.messages.len().saturating_sub(1)));

        let mut rows = Vec::new();
        for (index, message) in self.messages[..shown].iter().enumerate() {
            if index > 0 {
                rows.push(Row::spacer());
            }

            let lines = textwrap::wrap(message.text(), &options);
            let inner = lines.iter().map(|l| l.width()).max().unwrap_or(0);
            let bubble = (inner + 2) as u16;
            let indent = match message.sender() {
                Sender::User => width.saturating_sub(bubble),
                Sender::Ai => 0,
            };
            let style = self.bubble_style(message.sender());

            for line in &lines {
                let pad = inner.saturating_sub(line.width());
                rows.push(Row {
                    indent,
                    text: format!(" {line}{} ", " ".repeat(pad)),
                    style,
                });
            }
        }

        if self.typing && shown == self.messages.len() {
            rows.push(Row::spacer());
            rows.push(Row {
                indent: 0,
                text: TYPING_INDICATOR.to_string(),
                style: Style::default()
                    .fg(self.theme.muted)
                    .add_modifier(Modifier::ITALIC),
            });
        }

        rows
    }
}

impl Widget for MessageList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height == 0 {
            return;
        }

        let rows = self.rows(area.width);
        let height = usize::from(area.height);
        let start = rows.len().saturating_sub(height);

        for (y, row) in (area.y..).zip(&rows[start..]) {
            let x = area.x + row.indent.min(area.width);
            let room = usize::from(area.width.saturating_sub(row.indent));
            buf.set_stringn(x, y, &row.text, room, row.style);
        }
    }
}

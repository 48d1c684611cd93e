//! Screen definitions for the helpdesk TUI.

pub mod chat;

pub use chat::{chat_layout, ChatLayout, ChatScreen};

use crate::app::App;
use crate::theme::Theme;
use crate::ui::centered_fixed;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Trait for screens that can be rendered.
pub trait Screen {
    /// Render the screen to the buffer.
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Render the whole frame: the chat plus the help overlay when open.
pub fn render_app(app: &App, area: Rect, buf: &mut Buffer) {
    ChatScreen.render(app, area, buf);
    if app.show_help {
        render_help_overlay(area, buf, &app.theme);
    }
}

/// Render the help overlay.
pub fn render_help_overlay(area: Rect, buf: &mut Buffer, theme: &Theme) {
    let help_text = r"
  Chat
    Enter             Send message
    Ctrl+P / Ctrl+N   Previous/next sent message
    Ctrl+U            Clear input

  Transcript
    Up/Down           Scroll one message
    PgUp/PgDn         Scroll five messages
    Ctrl+End          Jump to newest

    F1                Toggle this help
    Esc / Ctrl+C      Quit

  [Press any key to close]
";

    let width = 54.min(area.width.saturating_sub(4));
    let height = 18.min(area.height.saturating_sub(2));
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);

    let style = Style::default().fg(theme.text).bg(theme.surface);
    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(style);

    Paragraph::new(help_text)
        .block(block)
        .style(style)
        .render(overlay_area, buf);
}

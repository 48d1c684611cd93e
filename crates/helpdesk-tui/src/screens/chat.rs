//! Chat screen: transcript, input row and send button.

use crate::app::App;
use crate::conversation::MessageList;
use crate::screens::Screen;
use crate::ui::main_layout;
use crate::ui::widgets::{KeyHint, StatusBar};
use helpdesk_engine::ExchangePhase;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    widgets::{Block, Borders, Widget},
};

const TITLE: &str = " AI Helpdesk Assistant ";
const SEND_LABEL: &str = "[ Send ]";
#[allow(clippy::cast_possible_truncation)]
const SEND_WIDTH: u16 = SEND_LABEL.len() as u16;

/// Regions of the chat screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatLayout {
    /// Bordered chat frame.
    pub body: Rect,
    /// Transcript area inside the frame.
    pub messages: Rect,
    /// Line between the transcript and the input.
    pub divider: Rect,
    /// Text input.
    pub input: Rect,
    /// Send button, also the mouse hit area.
    pub send: Rect,
    /// Status bar.
    pub status: Rect,
}

/// Split the screen into chat regions.
pub fn chat_layout(area: Rect) -> ChatLayout {
    let (body, status) = main_layout(area);
    let inner = Block::default().borders(Borders::ALL).inner(body);

    let [messages, divider, input_row] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let [input, _, send] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(SEND_WIDTH),
    ])
    .areas(input_row);

    ChatLayout {
        body,
        messages,
        divider,
        input,
        send,
        status,
    }
}

/// The chat screen.
pub struct ChatScreen;

impl Screen for ChatScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let layout = chat_layout(area);
        let theme = &app.theme;
        let view = &app.view;

        let block = Block::default()
            .title(TITLE)
            .title_style(
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_focused))
            .style(Style::default().fg(theme.text).bg(theme.base));
        block.render(layout.body, buf);

        MessageList::new(view.messages(), theme)
            .scroll_back(view.scroll_back())
            .typing(view.phase() == ExchangePhase::AwaitingReply)
            .render(layout.messages, buf);

        if !layout.divider.is_empty() {
            buf.set_string(
                layout.divider.x,
                layout.divider.y,
                symbols::line::HORIZONTAL.repeat(usize::from(layout.divider.width)),
                Style::default().fg(theme.border),
            );
        }

        view.input()
            .widget(theme)
            .placeholder(view.placeholder())
            .focused(!app.show_help)
            .render(layout.input, buf);

        let send_style = if view.input().is_empty() {
            Style::default().fg(theme.muted)
        } else {
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD)
        };
        if !layout.send.is_empty() {
            buf.set_stringn(
                layout.send.x,
                layout.send.y,
                SEND_LABEL,
                usize::from(layout.send.width),
                send_style,
            );
        }

        StatusBar::new("HELPDESK", theme)
            .hints(vec![
                KeyHint::new("Enter", "Send"),
                KeyHint::new("Up/Dn", "Scroll"),
                KeyHint::new("F1", "Help"),
                KeyHint::new("Esc", "Quit"),
            ])
            .right(status_text(app))
            .render(layout.status, buf);
    }
}

fn status_text(app: &App) -> String {
    match app.view.pending() {
        0 if !app.view.is_following() => "scrolled".to_string(),
        0 => "ready".to_string(),
        1 => "waiting for reply".to_string(),
        n => format!("waiting for {n} replies"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_app, render_screen_to_string, render_screen_to_string_sized};
    use helpdesk_engine::REPLY_DELAY;
    use insta::assert_snapshot;
    use std::time::Duration;

    #[test]
    fn test_layout_regions() {
        let layout = chat_layout(Rect::new(0, 0, 36, 9));
        assert_eq!(layout.body, Rect::new(0, 0, 36, 8));
        assert_eq!(layout.messages, Rect::new(1, 1, 34, 4));
        assert_eq!(layout.divider, Rect::new(1, 5, 34, 1));
        assert_eq!(layout.input, Rect::new(1, 6, 25, 1));
        assert_eq!(layout.send, Rect::new(27, 6, 8, 1));
        assert_eq!(layout.status, Rect::new(0, 8, 36, 1));
    }

    #[test]
    fn test_layout_survives_tiny_terminal() {
        for (w, h) in [(0, 0), (1, 1), (5, 3), (12, 4)] {
            let _ = chat_layout(Rect::new(0, 0, w, h));
        }
    }

    #[test]
    fn test_render_survives_tiny_terminal() {
        let app = create_test_app();
        for (w, h) in [(1, 1), (5, 3), (12, 4), (20, 6)] {
            let _ = render_screen_to_string_sized(&ChatScreen, &app, w, h);
        }
    }

    #[test]
    fn test_initial_screen() {
        let app = create_test_app();
        let rendered = render_screen_to_string_sized(&ChatScreen, &app, 36, 9);
        let body: Vec<&str> = rendered.lines().take(8).collect();

        assert_snapshot!(body.join("\n"), @r"
        ┌ AI Helpdesk Assistant ───────────┐
        │ Welcome to AI Helpdesk!          │
        │ How can I assist you             │
        │ today?                           │
        │                                  │
        │──────────────────────────────────│
        │> _Ask a question...      [ Send ]│
        └──────────────────────────────────┘
        ");
    }

    #[test]
    fn test_status_bar_shows_mode_and_state() {
        let app = create_test_app();
        let rendered = render_screen_to_string(&ChatScreen, &app);
        let status = rendered.lines().last().unwrap();
        assert!(status.starts_with(" HELPDESK "));
        assert!(status.contains("Enter"));
        assert!(status.ends_with("ready"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_reply_shows_indicator_and_follow_up_placeholder() {
        let mut app = create_test_app();
        app.view.submit_text("Hello");

        let rendered = render_screen_to_string(&ChatScreen, &app);
        assert!(rendered.contains("Hello"));
        assert!(rendered.contains("Assistant is typing..."));
        assert!(rendered.contains("Ask a follow-up..."));
        assert!(rendered.contains("waiting for reply"));

        tokio::time::sleep(REPLY_DELAY + Duration::from_millis(1)).await;
        app.tick();

        let rendered = render_screen_to_string(&ChatScreen, &app);
        assert!(!rendered.contains("Assistant is typing..."));
        assert!(rendered.contains("Ask a question..."));
        assert!(rendered.lines().last().unwrap().ends_with("ready"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_replies_are_counted() {
        let mut app = create_test_app();
        app.view.submit_text("one");
        app.view.submit_text("two");

        let rendered = render_screen_to_string(&ChatScreen, &app);
        assert!(rendered.contains("waiting for 2 replies"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_scrolled_status() {
        let mut app = create_test_app();
        app.view.submit_text("one");
        app.view.next_reply().await;
        app.view.scroll_up(1);

        let rendered = render_screen_to_string(&ChatScreen, &app);
        assert!(rendered.lines().last().unwrap().ends_with("scrolled"));
    }

    #[test]
    fn test_typed_input_is_shown() {
        let mut app = create_test_app();
        app.view.input_mut().insert_str("event schedule");
        let rendered = render_screen_to_string(&ChatScreen, &app);
        assert!(rendered.contains("> event schedule_"));
        assert!(!rendered.contains("Ask a question..."));
    }
}

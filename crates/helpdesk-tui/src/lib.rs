//! helpdesk-tui: Terminal UI for the helpdesk chat
//!
//! This crate provides the interactive layer on top of `helpdesk-engine`:
//! - The chat screen (transcript bubbles, input row, send button)
//! - Key and mouse handling with a reply poll on every wakeup
//! - Headless mode for testing and automation

mod app;
pub mod conversation;
mod event;
pub mod headless;
mod screens;
#[cfg(test)]
pub mod test_utils;
pub mod theme;
mod ui;

pub use app::App;
pub use event::{Action, Event, EventHandler};
pub use helpdesk_engine;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use helpdesk_engine::Config;
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, stdout};
use tracing::info;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen,
            ShowCursor
        );
    }
}

/// Run the TUI application.
///
/// Sets up the terminal, runs the event loop until the user quits, cancels
/// any replies still pending and restores the terminal.
pub async fn run_tui(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    // Fail on a bad config before touching the terminal
    let mut app = App::new(config)?;

    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut events = EventHandler::new(config.tick_rate_ms);
    info!(tick_rate_ms = config.tick_rate_ms, "chat started");

    let result = run_loop(&mut terminal, &mut app, &mut events).await;
    app.teardown();
    info!(messages = app.view.messages().len(), "chat closed");

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| screens::render_app(app, frame.area(), frame.buffer_mut()))?;

        if app.should_quit {
            break;
        }

        let Some(event) = events.next().await else {
            break;
        };

        match event {
            Event::Key(key) => app.handle_key(key),
            Event::Mouse(mouse) => {
                let size = terminal.size()?;
                let layout = screens::chat_layout(Rect::new(0, 0, size.width, size.height));
                app.handle_mouse(mouse, &layout);
            }
            Event::Paste(text) => app.handle_paste(&text),
            Event::Tick => app.tick(),
            Event::Resize(_, _) => {
                // Terminal will handle resize automatically
            }
        }

        // Replies land on any wakeup, not only idle ticks
        app.view.poll_replies();
    }

    Ok(())
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

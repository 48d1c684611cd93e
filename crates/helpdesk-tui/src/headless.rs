//! Headless mode for the helpdesk TUI.
//!
//! Runs the chat against a [`TestBackend`] instead of a real terminal, so it
//! can be driven end to end from tests or scripts. Input is sent through a
//! channel and the rendered screen is published after every draw.

use crate::app::App;
use crate::event::Action;
use crate::screens;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use helpdesk_engine::{Config, ExchangePhase};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::debug;

/// Default terminal dimensions for headless mode.
pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_HEIGHT: u16 = 24;

/// Input accepted by a headless TUI.
#[derive(Debug, Clone)]
pub enum HeadlessInput {
    /// A raw key press, routed like a terminal key.
    Key(KeyEvent),
    /// An action, bypassing key mapping.
    Action(Action),
    /// Characters typed one by one into the input.
    Text(String),
}

/// State captured from the headless TUI after each render.
#[derive(Debug, Clone, Default)]
pub struct HeadlessState {
    /// Text contents of the terminal buffer.
    pub screen_contents: String,
    /// Number of messages in the transcript.
    pub message_count: usize,
    /// Exchange phase at the time of the render.
    pub phase: ExchangePhase,
    /// Whether the TUI should quit.
    pub should_quit: bool,
    /// Whether help overlay is visible.
    pub show_help: bool,
}

/// Handle to control a headless TUI instance.
pub struct HeadlessHandle {
    input_tx: mpsc::UnboundedSender<HeadlessInput>,
    state_rx: watch::Receiver<HeadlessState>,
}

impl HeadlessHandle {
    /// Send a key press. Returns `true` if the TUI is still running.
    pub fn send_key(&self, key: KeyEvent) -> bool {
        self.input_tx.send(HeadlessInput::Key(key)).is_ok()
    }

    /// Send an action. Returns `true` if the TUI is still running.
    pub fn send_action(&self, action: Action) -> bool {
        self.input_tx.send(HeadlessInput::Action(action)).is_ok()
    }

    /// Type text into the input. Returns `true` if the TUI is still running.
    pub fn type_text(&self, text: &str) -> bool {
        self.input_tx
            .send(HeadlessInput::Text(text.to_string()))
            .is_ok()
    }

    /// Type text and press Enter.
    pub fn submit(&self, text: &str) -> bool {
        self.type_text(text) && self.send_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
    }

    /// Get the current state of the TUI.
    pub fn state(&self) -> HeadlessState {
        self.state_rx.borrow().clone()
    }

    /// Wait until a condition is met on the state.
    ///
    /// Returns the state when the condition is met, or `None` if timed out.
    pub async fn wait_for<F>(&mut self, condition: F, timeout: Duration) -> Option<HeadlessState>
    where
        F: Fn(&HeadlessState) -> bool,
    {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let state = self.state();
            if condition(&state) {
                return Some(state);
            }

            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return None;
            }

            match tokio::time::timeout(remaining, self.state_rx.changed()).await {
                Ok(Ok(())) => {}
                // Timed out, or the TUI task ended
                Ok(Err(_)) | Err(_) => return None,
            }
        }
    }

    /// Wait for specific text to appear on screen.
    pub async fn wait_for_text(&mut self, text: &str, timeout: Duration) -> Option<HeadlessState> {
        self.wait_for(|s| s.screen_contents.contains(text), timeout)
            .await
    }

    /// Wait until the transcript holds `count` messages.
    pub async fn wait_for_messages(
        &mut self,
        count: usize,
        timeout: Duration,
    ) -> Option<HeadlessState> {
        self.wait_for(|s| s.message_count >= count, timeout).await
    }

    /// Check if the TUI has quit.
    pub fn has_quit(&self) -> bool {
        self.state().should_quit
    }
}

/// Configuration for headless mode.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Terminal width.
    pub width: u16,
    /// Terminal height.
    pub height: u16,
    /// Tick rate in milliseconds.
    pub tick_rate_ms: u64,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tick_rate_ms: 20,
        }
    }
}

/// Run the TUI in headless mode.
///
/// Returns a handle to control the TUI and a join handle for the background
/// task. Dropping the handle ends the loop.
///
/// ```ignore
/// let (mut handle, task) = run_tui_headless(Config::default(), HeadlessConfig::default());
/// handle.submit("hello");
/// handle.wait_for_messages(3, Duration::from_secs(2)).await;
/// handle.send_action(Action::Quit);
/// task.await??;
/// ```
pub fn run_tui_headless(
    config: Config,
    headless: HeadlessConfig,
) -> (HeadlessHandle, JoinHandle<Result<(), String>>) {
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(HeadlessState::default());

    let task = tokio::spawn(async move {
        run_headless_loop(&config, &headless, input_rx, state_tx)
            .await
            .map_err(|e| e.to_string())
    });

    let handle = HeadlessHandle { input_tx, state_rx };

    (handle, task)
}

async fn run_headless_loop(
    config: &Config,
    headless: &HeadlessConfig,
    mut input_rx: mpsc::UnboundedReceiver<HeadlessInput>,
    state_tx: watch::Sender<HeadlessState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let backend = TestBackend::new(headless.width, headless.height);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config)?;
    let tick_duration = Duration::from_millis(headless.tick_rate_ms.max(1));

    loop {
        terminal.draw(|frame| screens::render_app(&app, frame.area(), frame.buffer_mut()))?;

        let screen_contents = buffer_to_string(terminal.backend().buffer());
        let _ = state_tx.send(HeadlessState {
            screen_contents,
            message_count: app.view.messages().len(),
            phase: app.view.phase(),
            should_quit: app.should_quit,
            show_help: app.show_help,
        });

        if app.should_quit {
            break;
        }

        tokio::select! {
            input = input_rx.recv() => match input {
                Some(HeadlessInput::Key(key)) => app.handle_key(key),
                Some(HeadlessInput::Action(action)) => app.handle_action(action),
                Some(HeadlessInput::Text(text)) => {
                    for ch in text.chars() {
                        app.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
                    }
                }
                None => break,
            },
            () = tokio::time::sleep(tick_duration) => app.tick(),
        }

        app.view.poll_replies();
    }

    app.teardown();
    debug!("headless loop finished");
    Ok(())
}

/// Convert a terminal buffer to a string, one line per row with trailing
/// spaces trimmed.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;
    use ratatui::style::Style;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn seeded_config() -> Config {
        Config {
            seed: Some(3),
            ..Config::default()
        }
    }

    #[test]
    fn test_headless_state_default() {
        let state = HeadlessState::default();
        assert_eq!(state.phase, ExchangePhase::Idle);
        assert_eq!(state.message_count, 0);
        assert!(!state.should_quit);
        assert!(!state.show_help);
        assert!(state.screen_contents.is_empty());
    }

    #[test]
    fn test_headless_config_default() {
        let config = HeadlessConfig::default();
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.tick_rate_ms, 20);
    }

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 2);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", Style::default());
        buffer.set_string(0, 1, "World", Style::default());

        assert_eq!(buffer_to_string(&buffer), "Hello\nWorld");
    }

    #[tokio::test]
    async fn test_greeting_exchange_end_to_end() {
        let (mut handle, task) = run_tui_headless(seeded_config(), HeadlessConfig::default());

        let state = handle
            .wait_for_text("Welcome to AI Helpdesk!", TIMEOUT)
            .await
            .expect("welcome message rendered");
        assert_eq!(state.message_count, 1);
        assert!(state.screen_contents.contains("Ask a question..."));

        assert!(handle.submit("hello"));
        let state = handle
            .wait_for_messages(2, TIMEOUT)
            .await
            .expect("user message appended");
        assert_eq!(state.phase, ExchangePhase::AwaitingReply);
        assert!(state.screen_contents.contains(" hello "));

        let state = handle
            .wait_for_messages(3, TIMEOUT)
            .await
            .expect("reply delivered");
        assert_eq!(state.phase, ExchangePhase::Idle);
        let greeted = helpdesk_engine::ResponseTable::builtin()
            .greetings
            .iter()
            .any(|g| state.screen_contents.contains(g.as_str()));
        assert!(greeted, "{}", state.screen_contents);

        assert!(handle.send_action(Action::Quit));
        task.await.unwrap().unwrap();
        assert!(handle.has_quit());
    }

    #[tokio::test]
    async fn test_reply_arrives_under_steady_input() {
        // Ticks never fire while input keeps arriving
        let headless = HeadlessConfig {
            tick_rate_ms: 60_000,
            ..HeadlessConfig::default()
        };
        let (mut handle, task) = run_tui_headless(seeded_config(), headless);
        handle
            .wait_for_messages(1, TIMEOUT)
            .await
            .expect("welcome message rendered");

        assert!(handle.submit("hello"));
        let deadline = tokio::time::Instant::now() + TIMEOUT;
        while handle.state().message_count < 3 {
            assert!(
                tokio::time::Instant::now() < deadline,
                "reply never delivered: {}",
                handle.state().screen_contents
            );
            assert!(handle.send_action(Action::None));
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(handle.state().phase, ExchangePhase::Idle);

        assert!(handle.send_action(Action::Quit));
        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_help_toggle_end_to_end() {
        let (mut handle, task) = run_tui_headless(seeded_config(), HeadlessConfig::default());

        assert!(handle.send_key(KeyEvent::new(KeyCode::F(1), KeyModifiers::NONE)));
        let state = handle
            .wait_for(|s| s.show_help, TIMEOUT)
            .await
            .expect("help shown");
        assert!(state.screen_contents.contains("Toggle this help"));

        // Esc closes help before it quits
        assert!(handle.send_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        handle
            .wait_for(|s| !s.show_help, TIMEOUT)
            .await
            .expect("help closed");
        assert!(!handle.has_quit());

        assert!(handle.send_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_invalid_config_fails_task() {
        let mut config = Config::default();
        config.welcome_message = "  ".to_string();
        let (_handle, task) = run_tui_headless(config, HeadlessConfig::default());
        assert!(task.await.unwrap().is_err());
    }
}

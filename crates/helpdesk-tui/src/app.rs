//! Application state and update logic for the helpdesk TUI.

use crate::conversation::ConversationView;
use crate::event::{key_to_action, Action};
use crate::screens::ChatLayout;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use helpdesk_engine::{Config, ConfigError};
use ratatui::layout::Position;
use tracing::debug;

/// Messages scrolled per page key.
const PAGE_SIZE: usize = 5;

/// Application state.
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Whether the help overlay is visible.
    pub show_help: bool,

    /// The chat itself.
    pub view: ConversationView,

    /// Colour palette.
    pub theme: Theme,

    /// Tick counter.
    pub tick: usize,
}

impl App {
    /// Create a new app instance from configuration.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let session = config.session()?;
        Ok(Self {
            should_quit: false,
            show_help: false,
            view: ConversationView::new(session),
            theme: Theme::from_choice(config.theme),
            tick: 0,
        })
    }

    /// Create an app with a fixed seed and default settings.
    #[cfg(test)]
    pub fn new_for_test() -> Self {
        let config = Config {
            seed: Some(1),
            ..Config::default()
        };
        Self::new(&config).expect("default config is valid")
    }

    /// Handle a key press: text editing first, then actions.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if !self.show_help && self.handle_input_key(key) {
            return;
        }
        self.handle_action(key_to_action(key));
    }

    /// Apply an editing key to the input. Returns true if it was consumed.
    fn handle_input_key(&mut self, key: KeyEvent) -> bool {
        let input = self.view.input_mut();

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('p') => input.history_prev(),
                KeyCode::Char('n') => input.history_next(),
                KeyCode::Char('u') => input.clear(),
                _ => return false,
            }
            return true;
        }

        match key.code {
            KeyCode::Char(c) => input.insert(c),
            KeyCode::Backspace => input.backspace(),
            KeyCode::Delete => input.delete(),
            KeyCode::Left => input.move_left(),
            KeyCode::Right => input.move_right(),
            KeyCode::Home => input.move_home(),
            KeyCode::End => input.move_end(),
            _ => return false,
        }
        true
    }

    /// Handle an action.
    pub fn handle_action(&mut self, action: Action) {
        // Global actions
        match action {
            Action::Quit => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            Action::Help => {
                self.show_help = !self.show_help;
                return;
            }
            _ => {}
        }

        // If help is showing, any key closes it
        if self.show_help {
            self.show_help = false;
            return;
        }

        match action {
            Action::Back => self.should_quit = true,
            Action::Submit => {
                let outcome = self.view.submit();
                debug!(?outcome, "submit");
            }
            Action::ScrollUp => self.view.scroll_up(1),
            Action::ScrollDown => self.view.scroll_down(1),
            Action::PageUp => self.view.scroll_up(PAGE_SIZE),
            Action::PageDown => self.view.scroll_down(PAGE_SIZE),
            Action::JumpToEnd => self.view.scroll_to_bottom(),
            Action::Quit | Action::Help | Action::None => {}
        }
    }

    /// Insert pasted text into the input. Line breaks are dropped.
    pub fn handle_paste(&mut self, text: &str) {
        if !self.show_help {
            self.view.input_mut().insert_str(text);
        }
    }

    /// Handle a mouse event against the current screen layout.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, layout: &ChatLayout) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.handle_action(Action::ScrollUp),
            MouseEventKind::ScrollDown => self.handle_action(Action::ScrollDown),
            MouseEventKind::Down(MouseButton::Left) => {
                if layout.send.contains(Position::new(mouse.column, mouse.row)) {
                    self.handle_action(Action::Submit);
                }
            }
            _ => {}
        }
    }

    /// Advance the tick counter and pick up delivered replies.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        self.view.poll_replies();
    }

    /// Cancel pending replies before the app goes away.
    pub fn teardown(&mut self) {
        let cancelled = self.view.teardown();
        debug!(cancelled, "app torn down");
    }
}

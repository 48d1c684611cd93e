//! Test utilities for helpdesk-tui snapshot and integration testing.

use crate::app::App;
use crate::screens::{render_app, Screen};
use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Terminal};

pub use crate::headless::buffer_to_string;

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// Create a test terminal with custom dimensions.
pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Create a test app with a seeded classifier.
pub fn create_test_app() -> App {
    App::new_for_test()
}

/// Render a screen to a buffer and return it as a string.
pub fn render_screen_to_string<S: Screen>(screen: &S, app: &App) -> String {
    render_screen_to_string_sized(screen, app, TEST_WIDTH, TEST_HEIGHT)
}

/// Render a screen with custom dimensions.
pub fn render_screen_to_string_sized<S: Screen>(
    screen: &S,
    app: &App,
    width: u16,
    height: u16,
) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    screen.render(app, area, &mut buffer);
    buffer_to_string(&buffer)
}

/// Render the full frame (including overlays) through a test terminal.
pub fn render_app_to_string(app: &App) -> String {
    let mut terminal = create_test_terminal_sized(TEST_WIDTH, TEST_HEIGHT);
    terminal
        .draw(|frame| render_app(app, frame.area(), frame.buffer_mut()))
        .expect("Failed to draw");
    buffer_to_string(terminal.backend().buffer())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_terminal() {
        let terminal = create_test_terminal_sized(TEST_WIDTH, TEST_HEIGHT);
        let size = terminal.size().unwrap();
        assert_eq!(size.width, TEST_WIDTH);
        assert_eq!(size.height, TEST_HEIGHT);
    }

    #[test]
    fn test_create_test_app() {
        let app = create_test_app();
        assert!(!app.should_quit);
        assert!(!app.show_help);
        assert_eq!(app.view.messages().len(), 1);
    }

    #[test]
    fn test_render_app_matches_terminal_size() {
        let app = create_test_app();
        let rendered = render_app_to_string(&app);
        assert_eq!(rendered.lines().count(), usize::from(TEST_HEIGHT));
        assert!(rendered.contains("AI Helpdesk Assistant"));
    }
}

//! Catppuccin colour palettes for the helpdesk TUI.

use helpdesk_engine::ThemeChoice;
use ratatui::style::Color;

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds
    pub base: Color,
    pub surface: Color,

    // Foregrounds
    pub text: Color,
    pub muted: Color,

    // Accents
    pub primary: Color,

    // Message bubbles
    pub user_bubble: Color,
    pub user_text: Color,
    pub ai_bubble: Color,
    pub ai_text: Color,

    // Status bar
    pub status_bg: Color,
    pub key_bg: Color,

    // Borders
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl Theme {
    /// Theme for a configured choice.
    pub fn from_choice(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Mocha => Self::mocha(),
            ThemeChoice::Latte => Self::latte(),
            ThemeChoice::HighContrast => Self::high_contrast(),
        }
    }

    /// Catppuccin Mocha theme (default dark theme).
    pub fn mocha() -> Self {
        Self {
            // Backgrounds
            base: Color::Rgb(30, 30, 46),    // #1e1e2e
            surface: Color::Rgb(49, 50, 68), // #313244

            // Foregrounds
            text: Color::Rgb(205, 214, 244),    // #cdd6f4
            muted: Color::Rgb(108, 112, 134),   // #6c7086

            // Accents
            primary: Color::Rgb(137, 180, 250),   // #89b4fa (blue)

            // Bubbles: blue for the user, grey for the assistant
            user_bubble: Color::Rgb(137, 180, 250), // #89b4fa
            user_text: Color::Rgb(17, 17, 27),      // #11111b
            ai_bubble: Color::Rgb(88, 91, 112),     // #585b70
            ai_text: Color::Rgb(205, 214, 244),     // #cdd6f4

            // Status bar
            status_bg: Color::Rgb(49, 50, 68), // #313244
            key_bg: Color::Rgb(69, 71, 90),    // #45475a

            // Borders
            border: Color::Rgb(69, 71, 90),             // #45475a
            border_focused: Color::Rgb(137, 180, 250), // #89b4fa
        }
    }

    /// Catppuccin Latte theme (light theme).
    pub fn latte() -> Self {
        Self {
            // Backgrounds (inverted for light theme)
            base: Color::Rgb(239, 241, 245),    // #eff1f5
            surface: Color::Rgb(230, 233, 239), // #e6e9ef

            // Foregrounds
            text: Color::Rgb(76, 79, 105),    // #4c4f69
            muted: Color::Rgb(140, 143, 161), // #8c8fa1

            // Accents
            primary: Color::Rgb(30, 102, 245),   // #1e66f5 (blue)

            user_bubble: Color::Rgb(30, 102, 245),  // #1e66f5
            user_text: Color::Rgb(239, 241, 245),   // #eff1f5
            ai_bubble: Color::Rgb(124, 127, 147),   // #7c7f93
            ai_text: Color::Rgb(239, 241, 245),     // #eff1f5

            status_bg: Color::Rgb(220, 224, 232), // #dce0e8
            key_bg: Color::Rgb(188, 192, 204),    // #bcc0cc

            // Borders
            border: Color::Rgb(188, 192, 204),        // #bcc0cc
            border_focused: Color::Rgb(30, 102, 245), // #1e66f5
        }
    }

    /// High contrast theme for accessibility.
    pub fn high_contrast() -> Self {
        Self {
            // Maximum contrast backgrounds
            base: Color::Black,
            surface: Color::Rgb(20, 20, 20),

            // Maximum contrast foregrounds
            text: Color::White,
            muted: Color::Rgb(150, 150, 150),

            // Bright accents
            primary: Color::Cyan,

            user_bubble: Color::Blue,
            user_text: Color::White,
            ai_bubble: Color::DarkGray,
            ai_text: Color::White,

            status_bg: Color::Rgb(20, 20, 20),
            key_bg: Color::Blue,

            // Borders
            border: Color::White,
            border_focused: Color::Cyan,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mocha_theme_creates() {
        let theme = Theme::mocha();
        assert!(matches!(theme.base, Color::Rgb(30, 30, 46)));
    }

    #[test]
    fn test_latte_theme_creates() {
        let theme = Theme::latte();
        assert!(matches!(theme.base, Color::Rgb(239, 241, 245)));
    }

    #[test]
    fn test_from_choice() {
        assert!(matches!(
            Theme::from_choice(ThemeChoice::HighContrast).base,
            Color::Black
        ));
        assert!(matches!(
            Theme::from_choice(ThemeChoice::Latte).base,
            Color::Rgb(239, 241, 245)
        ));
    }

    #[test]
    fn test_bubbles_differ_per_sender() {
        for theme in [Theme::mocha(), Theme::latte(), Theme::high_contrast()] {
            assert_ne!(theme.user_bubble, theme.ai_bubble);
        }
    }
}

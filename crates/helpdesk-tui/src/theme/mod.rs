//! Theme components for the TUI.
//!
//! [`Theme`] is a colour palette (Catppuccin Mocha/Latte/High Contrast),
//! selected through [`helpdesk_engine::ThemeChoice`].

mod colors;

pub use colors::Theme;

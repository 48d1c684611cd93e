//! UI building blocks for the helpdesk TUI.

pub mod layout;
pub mod widgets;

pub use layout::*;
pub use widgets::*;

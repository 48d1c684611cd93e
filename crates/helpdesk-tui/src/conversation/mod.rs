//! Conversation module.
//!
//! The conversation is the whole chat surface:
//! - [`ConversationView`] owns the session and the pending input buffer
//! - [`MessageList`] renders the transcript as sender-aligned bubbles
//! - [`input_placeholder`] gives phase-aware hint text for the input row

mod placeholder;
mod view;
mod widget;

pub use placeholder::input_placeholder;
pub use view::ConversationView;
pub use widget::MessageList;

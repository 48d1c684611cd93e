//! helpdesk-engine: Headless core of the helpdesk chat
//!
//! This crate provides everything that does not touch a terminal:
//! - The ordered response table and its invariants
//! - The keyword classifier with a seedable random source
//! - The append-only conversation state
//! - A session that delivers replies after a fixed delay
//! - JSON configuration

pub mod classifier;
pub mod config;
pub mod conversation;
pub mod responses;
pub mod session;

// Re-export commonly used types
pub use classifier::{route, Classifier, Reply, Route};
pub use config::{Config, ConfigError, ThemeChoice};
pub use conversation::{ConversationState, Message, Sender};
pub use responses::{Category, ResponseTable, TableError, GREETING_TRIGGERS, WELCOME_MESSAGE};
pub use session::{ExchangePhase, Session, Submission, REPLY_DELAY};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! Conversation view state.
//!
//! Ties the engine session to the input buffer and the transcript scroll
//! position. Every change to the conversation snaps the transcript back to
//! the newest message.

use helpdesk_engine::{ExchangePhase, Message, Session, Submission};

use crate::ui::widgets::TextInputState;

use super::placeholder::input_placeholder;

/// Chat state owned by one mounted view.
pub struct ConversationView {
    session: Session,
    input: TextInputState,
    /// Messages hidden below the bottom edge (0 = following).
    scroll_back: usize,
}

impl ConversationView {
    /// Create a view over a session.
    pub fn new(session: Session) -> Self {
        Self {
            session,
            input: TextInputState::new(),
            scroll_back: 0,
        }
    }

    /// Messages in insertion order.
    pub fn messages(&self) -> &[Message] {
        self.session.messages()
    }

    /// Current exchange phase.
    pub fn phase(&self) -> ExchangePhase {
        self.session.phase()
    }

    /// Replies scheduled but not yet shown.
    pub fn pending(&self) -> usize {
        self.session.pending()
    }

    /// The input buffer.
    pub fn input(&self) -> &TextInputState {
        &self.input
    }

    /// Mutable access to the input buffer, for editing keys.
    pub fn input_mut(&mut self) -> &mut TextInputState {
        &mut self.input
    }

    /// Placeholder for the input row.
    pub fn placeholder(&self) -> &'static str {
        input_placeholder(self.phase())
    }

    /// Submit the current input buffer.
    ///
    /// Blank input leaves both the conversation and the buffer untouched.
    pub fn submit(&mut self) -> Submission {
        let outcome = self.session.submit(self.input.content());
        if outcome == Submission::Accepted {
            self.input.submit();
            self.scroll_to_bottom();
        }
        outcome
    }

    /// Submit text directly, bypassing the buffer contents.
    pub fn submit_text(&mut self, raw: &str) -> Submission {
        let outcome = self.session.submit(raw);
        if outcome == Submission::Accepted {
            self.input.clear();
            self.scroll_to_bottom();
        }
        outcome
    }

    /// Append replies that have arrived. Returns how many were appended.
    pub fn poll_replies(&mut self) -> usize {
        let delivered = self.session.poll_replies();
        if delivered > 0 {
            self.scroll_to_bottom();
        }
        delivered
    }

    /// Wait for the next reply and append it.
    pub async fn next_reply(&mut self) -> Option<Message> {
        let reply = self.session.next_reply().await.cloned();
        if reply.is_some() {
            self.scroll_to_bottom();
        }
        reply
    }

    /// Cancel pending replies. The view must not be used for new exchanges
    /// afterwards.
    pub fn teardown(&mut self) -> usize {
        self.session.shutdown()
    }

    /// Messages hidden below the bottom edge.
    pub fn scroll_back(&self) -> usize {
        self.scroll_back
    }

    /// Whether the newest message is pinned into view.
    pub fn is_following(&self) -> bool {
        self.scroll_back == 0
    }

    /// Scroll towards older messages.
    pub fn scroll_up(&mut self, messages: usize) {
        let max = self.messages().len().saturating_sub(1);
        self.scroll_back = (self.scroll_back + messages).min(max);
    }

    /// Scroll towards newer messages.
    pub fn scroll_down(&mut self, messages: usize) {
        self.scroll_back = self.scroll_back.saturating_sub(messages);
    }

    /// Jump to the newest message.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_back = 0;
    }
}

//! Conversation session with deferred reply delivery.
//!
//! A [`Session`] owns the conversation state and the classifier. Each
//! accepted submission appends the user message right away and schedules the
//! assistant reply on a tokio timer task. Replies come back over a channel
//! and are appended by the owner, so the state is only ever mutated from the
//! task that owns the session.

use crate::classifier::Classifier;
use crate::conversation::{ConversationState, Message};
use crate::responses::WELCOME_MESSAGE;
use rand::{rngs::StdRng, Rng};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Delay between a submission and its reply.
pub const REPLY_DELAY: Duration = Duration::from_millis(500);

/// Whether any reply is still on its way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExchangePhase {
    /// Nothing pending.
    #[default]
    Idle,
    /// At least one reply is scheduled but not yet appended.
    AwaitingReply,
}

/// Outcome of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Blank input; nothing changed.
    Ignored,
    /// User message appended and reply scheduled.
    Accepted,
}

/// A conversation plus its in-flight reply timers.
///
/// Must be used from within a tokio runtime. Dropping the session aborts any
/// timers that have not fired yet.
pub struct Session<R = StdRng> {
    state: ConversationState,
    classifier: Classifier<R>,
    timers: Vec<JoinHandle<()>>,
    in_flight: usize,
    reply_tx: mpsc::UnboundedSender<Message>,
    reply_rx: mpsc::UnboundedReceiver<Message>,
}

impl<R: Rng> Session<R> {
    /// Start a session greeted by the default welcome message.
    pub fn new(classifier: Classifier<R>) -> Self {
        Self::with_welcome(classifier, WELCOME_MESSAGE)
    }

    /// Start a session greeted by a custom welcome message.
    pub fn with_welcome(classifier: Classifier<R>, welcome: impl Into<String>) -> Self {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        info!("helpdesk session started");
        Self {
            state: ConversationState::seeded(welcome),
            classifier,
            timers: Vec::new(),
            in_flight: 0,
            reply_tx,
            reply_rx,
        }
    }

    /// Conversation state.
    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Messages in insertion order.
    pub fn messages(&self) -> &[Message] {
        self.state.messages()
    }

    /// Current exchange phase.
    pub fn phase(&self) -> ExchangePhase {
        if self.in_flight > 0 {
            ExchangePhase::AwaitingReply
        } else {
            ExchangePhase::Idle
        }
    }

    /// Number of replies scheduled but not yet appended.
    pub fn pending(&self) -> usize {
        self.in_flight
    }

    /// Submit raw user input.
    ///
    /// Blank input is ignored. Otherwise the untrimmed input is appended as a
    /// user message, classified, and the reply is scheduled for delivery
    /// after [`REPLY_DELAY`].
    pub fn submit(&mut self, raw: &str) -> Submission {
        if raw.trim().is_empty() {
            debug!("ignoring blank submission");
            return Submission::Ignored;
        }

        self.state.append(Message::user(raw));
        let reply = self.classifier.classify(raw);
        self.schedule(Message::ai(reply));

        debug!(pending = self.in_flight, "submission accepted");
        Submission::Accepted
    }

    fn schedule(&mut self, reply: Message) {
        self.timers.retain(|timer| !timer.is_finished());

        let tx = self.reply_tx.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(REPLY_DELAY).await;
            if tx.send(reply).is_err() {
                warn!("reply discarded, session is gone");
            }
        });

        self.timers.push(timer);
        self.in_flight += 1;
    }

    fn deliver(&mut self, reply: Message) {
        self.state.append(reply);
        self.in_flight = self.in_flight.saturating_sub(1);
        debug!(pending = self.in_flight, "reply delivered");
    }

    /// Append every reply that has arrived. Returns how many were appended.
    pub fn poll_replies(&mut self) -> usize {
        let mut delivered = 0;
        while let Ok(reply) = self.reply_rx.try_recv() {
            self.deliver(reply);
            delivered += 1;
        }
        if delivered > 0 {
            self.timers.retain(|timer| !timer.is_finished());
        }
        delivered
    }

    /// Wait for the next reply and append it.
    ///
    /// Returns `None` straight away when nothing is pending.
    pub async fn next_reply(&mut self) -> Option<&Message> {
        if self.in_flight == 0 {
            return None;
        }
        let reply = self.reply_rx.recv().await?;
        self.deliver(reply);
        self.state.last()
    }

    /// Cancel all pending replies. Returns how many were cancelled.
    pub fn shutdown(&mut self) -> usize {
        for timer in self.timers.drain(..) {
            timer.abort();
        }
        while self.reply_rx.try_recv().is_ok() {}

        let cancelled = std::mem::take(&mut self.in_flight);
        if cancelled > 0 {
            info!(cancelled, "cancelled pending replies");
        }
        cancelled
    }
}

impl<R> Drop for Session<R> {
    fn drop(&mut self) {
        for timer in &self.timers {
            timer.abort();
        }
    }
}

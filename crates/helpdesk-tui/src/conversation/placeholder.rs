//! Phase-aware placeholder text for the input area.

use helpdesk_engine::ExchangePhase;

/// Get placeholder text for the input area based on the exchange phase.
#[must_use]
pub fn input_placeholder(phase: ExchangePhase) -> &'static str {
    match phase {
        ExchangePhase::Idle => "Ask a question...",
        ExchangePhase::AwaitingReply => "Ask a follow-up...",
    }
}

//! Travel handlers and the shared responder helper they build on.
//!
//! ```text
//! core::ask_with_preferences()   ← prompt + preference annotation
//!     ↑                    ↑
//!   chat            places (no-country fallback)
//!
//! weather                         ← tools only, never calls the responder
//! ```
//!
//! Every handler appends exactly one assistant message.

pub mod core;

mod chat;
mod places;
mod weather;

use std::fmt;

use crate::llm::Responder;
use crate::subsystems::memory::ConversationState;
use super::TurnError;

/// The three handler nodes a route can lead to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelNode {
    Chat,
    Weather,
    Places,
}

impl TravelNode {
    pub fn id(self) -> &'static str {
        match self {
            TravelNode::Chat => "chat",
            TravelNode::Weather => "weather",
            TravelNode::Places => "places",
        }
    }

    /// Run the handler against `state` and return the reply it appended.
    pub async fn run<R: Responder>(
        self,
        state: &mut ConversationState,
        responder: &R,
    ) -> Result<String, TurnError> {
        match self {
            TravelNode::Chat => chat::handle(state, responder).await,
            TravelNode::Weather => weather::handle(state),
            TravelNode::Places => places::handle(state, responder).await,
        }
    }
}

impl fmt::Display for TravelNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Lower-cased text of the last message; the handlers' common precondition.
fn last_text_lower(state: &ConversationState) -> Result<String, TurnError> {
    state
        .last_message()
        .map(|m| m.content.to_lowercase())
        .ok_or(TurnError::EmptyTranscript)
}

//! `chat` handler — free-form reply annotated with known preferences.

use tracing::debug;

use crate::llm::{Message, Responder};
use crate::subsystems::agents::TurnError;
use crate::subsystems::memory::ConversationState;
use super::core::{ask_with_preferences, chat_annotation};

pub(super) async fn handle<R: Responder>(
    state: &mut ConversationState,
    responder: &R,
) -> Result<String, TurnError> {
    let user_message = state.last_message().ok_or(TurnError::EmptyTranscript)?.clone();
    let annotation = chat_annotation(state.preferences());

    debug!(%annotation, "chat handler asking responder");
    let reply = ask_with_preferences(responder, &user_message, annotation).await?;

    state.push(Message::assistant(reply.clone()));
    Ok(reply)
}

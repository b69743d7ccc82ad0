//! `places` handler — catalog lookup for a named country, responder otherwise.

use tracing::debug;

use crate::llm::{Message, Responder};
use crate::subsystems::agents::TurnError;
use crate::subsystems::memory::ConversationState;
use crate::subsystems::tools::{KNOWN_COUNTRIES, retrieve_places};
use super::core::{ask_with_preferences, no_country_annotation};
use super::last_text_lower;

pub(super) async fn handle<R: Responder>(
    state: &mut ConversationState,
    responder: &R,
) -> Result<String, TurnError> {
    let text = last_text_lower(state)?;

    let reply = match KNOWN_COUNTRIES.into_iter().find(|c| text.contains(c)) {
        Some(country) => {
            debug!(%country, "places catalog lookup");
            retrieve_places(country)
        }
        None => {
            debug!("no known country in message, asking responder");
            let user_message = state.last_message().ok_or(TurnError::EmptyTranscript)?.clone();
            let annotation = no_country_annotation(state.preferences());
            ask_with_preferences(responder, &user_message, annotation).await?
        }
    };

    state.push(Message::assistant(reply.clone()));
    Ok(reply)
}

//! `weather` handler — city is the last word of the message.
//!
//! Naive on purpose: "weather in Goa?" yields the city `goa?`.

use tracing::debug;

use crate::llm::Message;
use crate::subsystems::agents::TurnError;
use crate::subsystems::memory::ConversationState;
use crate::subsystems::tools::weather_info;
use super::last_text_lower;

pub(super) fn handle(state: &mut ConversationState) -> Result<String, TurnError> {
    let text = last_text_lower(state)?;
    let city = text.split_whitespace().last().ok_or(TurnError::BlankMessage)?;

    debug!(%city, "weather lookup");
    let reply = weather_info(city);

    state.push(Message::assistant(reply.clone()));
    Ok(reply)
}

//! Keyword router — picks the handler for the latest message.
//!
//! Checks run against the lower-cased text in a fixed priority order:
//!
//! | order | condition                           | route          |
//! |-------|-------------------------------------|----------------|
//! | 1     | contains `"i like"`                 | `ContinueChat` |
//! | 2     | contains `"weather"`                | `FetchWeather` |
//! | 3     | contains `"recommend"` / `"places"` | `FetchPlaces`  |
//! | 4     | anything else                       | `Terminate`    |
//!
//! A preference statement wins over topic keywords in the same message.
//! Rule 1 is the only one with a side effect: the text after the last
//! `"i like"` is recorded as a preference.

use std::fmt;

use tracing::debug;

use crate::subsystems::memory::ConversationState;
use super::TurnError;
use super::travel::TravelNode;

const PREFERENCE_PHRASE: &str = "i like";

/// Routing decision for one turn. Recomputed every turn, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ContinueChat,
    FetchWeather,
    FetchPlaces,
    Terminate,
}

impl Route {
    /// Handler that runs for this decision; `None` ends the turn with no reply.
    pub fn node(self) -> Option<TravelNode> {
        match self {
            Route::ContinueChat => Some(TravelNode::Chat),
            Route::FetchWeather => Some(TravelNode::Weather),
            Route::FetchPlaces => Some(TravelNode::Places),
            Route::Terminate => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Route::ContinueChat => "continue_chat",
            Route::FetchWeather => "fetch_weather",
            Route::FetchPlaces => "fetch_places",
            Route::Terminate => "terminate",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decide the route for the last message, recording a preference when the
/// message states one.
pub fn route(state: &mut ConversationState) -> Result<Route, TurnError> {
    let text = state
        .last_message()
        .ok_or(TurnError::EmptyTranscript)?
        .content
        .to_lowercase();

    if let Some(preference) = extract_preference(&text) {
        debug!(%preference, "preference recorded");
        state.preferences_mut().record(preference);
        return Ok(Route::ContinueChat);
    }

    let decision = classify_topic(&text);
    debug!(route = %decision, "message routed");
    Ok(decision)
}

/// Trimmed text after the last `"i like"` in already lower-cased `text`.
pub fn extract_preference(text: &str) -> Option<&str> {
    text.rfind(PREFERENCE_PHRASE)
        .map(|idx| text[idx + PREFERENCE_PHRASE.len()..].trim())
}

fn classify_topic(text: &str) -> Route {
    if text.contains("weather") {
        Route::FetchWeather
    } else if text.contains("recommend") || text.contains("places") {
        Route::FetchPlaces
    } else {
        Route::Terminate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Message;

    fn state_with(text: &str) -> ConversationState {
        ConversationState::with_messages(vec![Message::user(text)])
    }

    #[test]
    fn preference_routes_to_chat_and_is_recorded() {
        let mut s = state_with("I like quiet beaches");
        assert_eq!(route(&mut s).unwrap(), Route::ContinueChat);
        assert_eq!(s.preferences().entries(), ["quiet beaches"]);
    }

    #[test]
    fn preference_uses_last_occurrence() {
        let mut s = state_with("I like hills but honestly i like   Old Towns  ");
        route(&mut s).unwrap();
        assert_eq!(s.preferences().entries(), ["old towns"]);
    }

    #[test]
    fn preference_beats_weather_keyword() {
        let mut s = state_with("I like checking the weather in Goa");
        assert_eq!(route(&mut s).unwrap(), Route::ContinueChat);
        assert_eq!(s.preferences().entries(), ["checking the weather in goa"]);
    }

    #[test]
    fn preference_recorded_once_per_routed_message() {
        let mut s = state_with("i like food");
        route(&mut s).unwrap();
        assert_eq!(s.preferences().len(), 1);
        s.push(Message::user("i like food"));
        route(&mut s).unwrap();
        assert_eq!(s.preferences().len(), 2);
    }

    #[test]
    fn bare_phrase_records_empty_preference() {
        let mut s = state_with("I LIKE");
        assert_eq!(route(&mut s).unwrap(), Route::ContinueChat);
        assert_eq!(s.preferences().entries(), [""]);
    }

    #[test]
    fn topic_keywords() {
        let cases = [
            ("what's the weather in Goa", Route::FetchWeather),
            ("WEATHER please", Route::FetchWeather),
            ("recommend places in france", Route::FetchPlaces),
            ("can you recommend something", Route::FetchPlaces),
            ("any good places?", Route::FetchPlaces),
            ("weather or places", Route::FetchWeather),
            ("hello there", Route::Terminate),
            ("", Route::Terminate),
        ];
        for (text, expected) in cases {
            let mut s = state_with(text);
            assert_eq!(route(&mut s).unwrap(), expected, "text: {text:?}");
            assert!(s.preferences().is_empty());
        }
    }

    #[test]
    fn routes_on_last_message_only() {
        let mut s = ConversationState::with_messages(vec![
            Message::user("what's the weather"),
            Message::assistant("sunny"),
            Message::user("hello there"),
        ]);
        assert_eq!(route(&mut s).unwrap(), Route::Terminate);
    }

    #[test]
    fn empty_transcript_fails_fast() {
        let mut s = ConversationState::new();
        assert!(matches!(route(&mut s), Err(TurnError::EmptyTranscript)));
    }

    #[test]
    fn route_to_node_mapping() {
        assert_eq!(Route::ContinueChat.node(), Some(TravelNode::Chat));
        assert_eq!(Route::FetchWeather.node(), Some(TravelNode::Weather));
        assert_eq!(Route::FetchPlaces.node(), Some(TravelNode::Places));
        assert_eq!(Route::Terminate.node(), None);
    }
}

//! Conversation state threaded through every turn.

use serde::{Deserialize, Serialize};

use crate::llm::Message;
use super::preferences::PreferenceStore;

/// Transcript plus accumulated preferences.
///
/// Both fields default to empty; the transcript is append-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    #[serde(default)]
    messages: Vec<Message>,
    #[serde(default)]
    preferences: PreferenceStore,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a state from an existing transcript (preferences start empty).
    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self { messages, preferences: PreferenceStore::new() }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn preferences(&self) -> &PreferenceStore {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut PreferenceStore {
        &mut self.preferences
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        let s = ConversationState::new();
        assert!(s.messages().is_empty());
        assert!(s.preferences().is_empty());
        assert!(s.last_message().is_none());
    }

    #[test]
    fn last_message_tracks_pushes() {
        let mut s = ConversationState::with_messages(vec![Message::user("hi")]);
        s.push(Message::assistant("hello"));
        assert_eq!(s.last_message(), Some(&Message::assistant("hello")));
        assert_eq!(s.messages().len(), 2);
    }

    #[test]
    fn missing_fields_deserialise_to_defaults() {
        let s: ConversationState = serde_json::from_str("{}").unwrap();
        assert_eq!(s, ConversationState::new());
    }
}

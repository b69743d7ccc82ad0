//! Shared responder call used by the chat handler and the places fallback.

use crate::llm::{Message, ProviderError, Responder};
use crate::subsystems::memory::PreferenceStore;

/// Annotation appended after the user's message on ordinary chat turns.
pub fn chat_annotation(preferences: &PreferenceStore) -> String {
    format!("(Your preferences so far: {})", preferences.summarize())
}

/// Annotation used when a places request names no known country.
pub fn no_country_annotation(preferences: &PreferenceStore) -> String {
    format!("(No country match, your preferences so far: {})", preferences.summarize())
}

/// Send `[user_message, assistant(annotation)]` to the responder and return
/// its text unchanged. Responder errors are passed through.
pub async fn ask_with_preferences<R: Responder>(
    responder: &R,
    user_message: &Message,
    annotation: String,
) -> Result<String, ProviderError> {
    let prompt = [user_message.clone(), Message::assistant(annotation)];
    responder.respond(&prompt).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::ScriptedResponder;

    #[test]
    fn annotations_embed_summary() {
        let mut prefs = PreferenceStore::new();
        assert_eq!(chat_annotation(&prefs), "(Your preferences so far: none)");
        prefs.record("beaches");
        prefs.record("street food");
        assert_eq!(
            no_country_annotation(&prefs),
            "(No country match, your preferences so far: beaches, street food)"
        );
    }

    #[tokio::test]
    async fn prompt_is_user_then_annotation() {
        let r = ScriptedResponder::new();
        r.queue_reply("ok");
        let user = Message::user("Hi!");
        let reply = ask_with_preferences(&r, &user, "(note)".into()).await.unwrap();

        assert_eq!(reply, "ok");
        assert_eq!(
            r.recorded_requests(),
            vec![vec![Message::user("Hi!"), Message::assistant("(note)")]]
        );
    }
}

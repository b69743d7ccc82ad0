//! Scripted responder for tests.
//!
//! Replies are served from a queue; every request is recorded so tests can
//! assert on the exact prompt a handler built.

use std::collections::VecDeque;
use std::sync::Mutex;

use super::{Message, ProviderError, Responder};

/// Responder double that returns queued replies in order.
///
/// When the queue is empty it answers with [`ScriptedResponder::FALLBACK`].
#[derive(Debug, Default)]
pub struct ScriptedResponder {
    replies: Mutex<VecDeque<Result<String, String>>>,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedResponder {
    pub const FALLBACK: &'static str = "scripted reply";

    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply.
    pub fn queue_reply(&self, text: impl Into<String>) -> &Self {
        self.lock_replies().push_back(Ok(text.into()));
        self
    }

    /// Queue a failure, surfaced as [`ProviderError::Request`].
    pub fn queue_error(&self, message: impl Into<String>) -> &Self {
        self.lock_replies().push_back(Err(message.into()));
        self
    }

    /// Every message list passed to `respond`, oldest first.
    pub fn recorded_requests(&self) -> Vec<Vec<Message>> {
        match self.requests.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.recorded_requests().len()
    }

    fn lock_replies(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<String, String>>> {
        match self.replies.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Responder for ScriptedResponder {
    async fn respond(&self, messages: &[Message]) -> Result<String, ProviderError> {
        match self.requests.lock() {
            Ok(mut guard) => guard.push(messages.to_vec()),
            Err(poisoned) => poisoned.into_inner().push(messages.to_vec()),
        }
        match self.lock_replies().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(msg)) => Err(ProviderError::Request(msg)),
            None => Ok(Self::FALLBACK.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_queue_then_fallback() {
        let r = ScriptedResponder::new();
        r.queue_reply("first").queue_error("boom");

        assert_eq!(r.respond(&[Message::user("a")]).await.unwrap(), "first");
        assert!(r.respond(&[Message::user("b")]).await.is_err());
        assert_eq!(
            r.respond(&[Message::user("c")]).await.unwrap(),
            ScriptedResponder::FALLBACK
        );
        assert_eq!(r.call_count(), 3);
        assert_eq!(r.recorded_requests()[1], vec![Message::user("b")]);
    }
}

//! Agents subsystem — the travel agent's turn loop.
//!
//! One turn = one inbound user message = at most one router evaluation and
//! at most one handler run:
//!
//! ```text
//! user message ─► router::route ─┬─ ContinueChat ─► chat    ─┐
//!                                ├─ FetchWeather ─► weather ─┼─► end of turn
//!                                ├─ FetchPlaces  ─► places  ─┘
//!                                └─ Terminate ──────────────────► end of turn (no reply)
//! ```
//!
//! The router, not the chat handler, sees each inbound message first: a
//! message like "hello there" must end the turn without a reply, and a
//! weather question must reach the weather handler without a chat round trip.
//! No handler loops back into the router within a turn; the next routing
//! decision waits for the next inbound message.

pub mod router;
pub mod travel;

use thiserror::Error;
use tracing::{debug, info};

use crate::llm::{Message, ProviderError, Responder};
use crate::subsystems::memory::ConversationState;
pub use router::{Route, route};
pub use travel::TravelNode;

#[derive(Debug, Error)]
pub enum TurnError {
    /// Routing or a handler needed a last message and there was none.
    #[error("empty transcript: no message to route")]
    EmptyTranscript,
    /// The last message has no words to work with.
    #[error("last message is blank")]
    BlankMessage,
    #[error("responder failed: {0}")]
    Responder(#[from] ProviderError),
}

/// What one turn decided and produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub route: Route,
    /// The appended assistant reply; `None` when the route was `Terminate`.
    pub reply: Option<String>,
}

/// Routes messages and runs handlers against an injected responder.
pub struct TravelAgent<R> {
    responder: R,
}

impl<R: Responder> TravelAgent<R> {
    pub fn new(responder: R) -> Self {
        Self { responder }
    }

    pub fn responder(&self) -> &R {
        &self.responder
    }

    /// Append `text` as a user message, then route and handle it.
    pub async fn run_turn(
        &self,
        state: &mut ConversationState,
        text: impl Into<String>,
    ) -> Result<TurnOutcome, TurnError> {
        state.push(Message::user(text));
        self.step(state).await
    }

    /// Route the transcript's current last message and run the chosen handler.
    pub async fn step(&self, state: &mut ConversationState) -> Result<TurnOutcome, TurnError> {
        let decision = route(state)?;

        let Some(node) = decision.node() else {
            info!(route = %decision, "turn ended without a handler");
            return Ok(TurnOutcome { route: decision, reply: None });
        };

        debug!(route = %decision, %node, "running handler");
        let reply = node.run(state, &self.responder).await?;
        info!(route = %decision, %node, reply_len = reply.len(), "turn complete");

        Ok(TurnOutcome { route: decision, reply: Some(reply) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::ScriptedResponder;

    fn agent() -> TravelAgent<ScriptedResponder> {
        TravelAgent::new(ScriptedResponder::new())
    }

    #[tokio::test]
    async fn preference_turn_chats_once() {
        let a = agent();
        a.responder().queue_reply("Lovely.");
        let mut s = ConversationState::with_messages(vec![Message::user("I like quiet beaches")]);

        let out = a.step(&mut s).await.unwrap();

        assert_eq!(out, TurnOutcome { route: Route::ContinueChat, reply: Some("Lovely.".into()) });
        assert_eq!(s.preferences().entries(), ["quiet beaches"]);
        assert_eq!(s.messages().len(), 2);
        assert_eq!(a.responder().call_count(), 1);
    }

    #[tokio::test]
    async fn weather_turn() {
        let a = agent();
        let mut s = ConversationState::with_messages(vec![Message::user("what's the weather in Goa")]);

        let out = a.step(&mut s).await.unwrap();

        assert_eq!(out.route, Route::FetchWeather);
        assert_eq!(out.reply.as_deref(), Some("The weather in goa is sunny 28°C (dummy)."));
        assert_eq!(a.responder().call_count(), 0);
    }

    #[tokio::test]
    async fn places_turn() {
        let a = agent();
        let mut s = ConversationState::with_messages(vec![Message::user("recommend places in france")]);

        let out = a.step(&mut s).await.unwrap();

        assert_eq!(out.route, Route::FetchPlaces);
        assert_eq!(
            s.last_message(),
            Some(&Message::assistant("Top places in france: Paris, Nice, Lyon"))
        );
    }

    #[tokio::test]
    async fn terminate_runs_no_handler() {
        let a = agent();
        let mut s = ConversationState::with_messages(vec![Message::user("hello there")]);

        let out = a.step(&mut s).await.unwrap();

        assert_eq!(out, TurnOutcome { route: Route::Terminate, reply: None });
        assert_eq!(s.messages().len(), 1);
        assert_eq!(a.responder().call_count(), 0);
    }

    #[tokio::test]
    async fn run_turn_appends_user_message_first() {
        let a = agent();
        let mut s = ConversationState::new();

        a.run_turn(&mut s, "weather in Lyon").await.unwrap();

        assert_eq!(
            s.messages(),
            [
                Message::user("weather in Lyon"),
                Message::assistant("The weather in lyon is sunny 28°C (dummy)."),
            ]
        );
    }

    #[tokio::test]
    async fn responder_failure_surfaces_from_turn() {
        let a = agent();
        a.responder().queue_error("connection refused");
        let mut s = ConversationState::new();

        let err = a.run_turn(&mut s, "i like trains").await.unwrap_err();

        assert!(err.to_string().contains("connection refused"));
        // The preference and user message stay; no assistant reply was added.
        assert_eq!(s.preferences().entries(), ["trains"]);
        assert_eq!(s.messages().len(), 1);
    }

    #[tokio::test]
    async fn router_sees_the_message_before_chat() {
        let a = agent();
        let mut s = ConversationState::new();

        let out = a.run_turn(&mut s, "what's the weather in Goa").await.unwrap();

        assert_eq!(out.route, Route::FetchWeather);
        assert_eq!(a.responder().call_count(), 0);
        assert_eq!(s.messages().len(), 2);
    }

    #[tokio::test]
    async fn step_on_empty_transcript_fails_fast() {
        let a = agent();
        let mut s = ConversationState::new();
        assert!(matches!(a.step(&mut s).await, Err(TurnError::EmptyTranscript)));
    }
}

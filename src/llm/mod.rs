//! Responder abstraction — the free-form text generator behind chat replies.
//!
//! [`Responder`] is the seam handlers depend on; [`LlmProvider`] is the
//! production implementation, an enum over concrete backends in
//! `providers/`. Tests substitute `testing::ScriptedResponder`, compiled only
//! for unit tests or with the `testing` feature.
//!
//! Provider instances are shared immutable capabilities — clone them freely.

pub mod providers;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Messages ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    #[error("provider request failed: {0}")]
    Request(String),
}

// ── Responder ─────────────────────────────────────────────────────────────────

/// Anything that turns an ordered message list into one reply.
///
/// Failures are returned as-is; callers do not retry.
pub trait Responder: Send + Sync {
    fn respond(
        &self,
        messages: &[Message],
    ) -> impl Future<Output = Result<String, ProviderError>> + Send;
}

// ── Provider enum ─────────────────────────────────────────────────────────────

/// All available provider backends.
///
/// Adding a backend = new module + new variant + new `respond` arm.
#[derive(Debug, Clone)]
pub enum LlmProvider {
    Dummy(providers::dummy::DummyProvider),
    OpenAiCompatible(providers::openai_compatible::OpenAiCompatibleProvider),
}

impl LlmProvider {
    /// Short backend name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            LlmProvider::Dummy(_) => "dummy",
            LlmProvider::OpenAiCompatible(_) => "openai-compatible",
        }
    }
}

impl Responder for LlmProvider {
    async fn respond(&self, messages: &[Message]) -> Result<String, ProviderError> {
        match self {
            LlmProvider::Dummy(p) => p.complete(messages).await,
            LlmProvider::OpenAiCompatible(p) => p.complete(messages).await,
        }
    }
}

//! Dummy LLM provider — echoes the latest user message prefixed with `[echo]`.
//! Used to run the console end-to-end without a model server.

use crate::llm::{Message, ProviderError, Role};

#[derive(Debug, Clone)]
pub struct DummyProvider;

impl DummyProvider {
    pub async fn complete(&self, messages: &[Message]) -> Result<String, ProviderError> {
        let last_user = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        Ok(format!("[echo] {last_user}"))
    }
}

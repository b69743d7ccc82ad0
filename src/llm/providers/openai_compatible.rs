//! OpenAI-compatible chat completion provider (`/v1/chat/completions`).
//!
//! Sends the full message list the handler built and returns the first
//! choice's text. All wire types are private to this module. Works against
//! OpenAI itself and local servers exposing the same route (Ollama,
//! LM Studio, llama.cpp server).

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use crate::llm::{Message, ProviderError};

// ── Public provider ───────────────────────────────────────────────────────────

/// Adapter for any HTTP endpoint implementing `/v1/chat/completions`.
///
/// Constructed once at startup, then cheaply cloned because
/// `reqwest::Client` is an `Arc` internally.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleProvider {
    client: Client,
    api_base_url: String,
    model: String,
    temperature: f32,
    api_key: Option<String>,
}

impl OpenAiCompatibleProvider {
    /// Build a provider from config values and an optional API key.
    ///
    /// `api_key` is `None` for keyless local models. When present it is sent
    /// as `Authorization: Bearer <key>` on every request.
    pub fn new(
        api_base_url: String,
        model: String,
        temperature: f32,
        timeout_seconds: u64,
        api_key: Option<String>,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| ProviderError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, api_base_url, model, temperature, api_key })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One round-trip: `messages` in, first choice's trimmed text out.
    pub async fn complete(&self, messages: &[Message]) -> Result<String, ProviderError> {
        let payload = ChatCompletionRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| WireMessage { role: m.role.as_str(), content: &m.content })
                .collect(),
            temperature: self.temperature,
        };

        debug!(
            model = %self.model,
            messages = messages.len(),
            "sending LLM request"
        );
        if tracing::enabled!(tracing::Level::TRACE) {
            let json = serde_json::to_string_pretty(&payload)
                .unwrap_or_else(|e| format!("<serialization failed: {e}>"));
            trace!(payload = %json, "full LLM request payload");
        }

        let mut req = self.client.post(&self.api_base_url).json(&payload);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req.send().await.map_err(|e| {
            error!(url = %self.api_base_url, error = %e, "LLM HTTP request failed (transport)");
            ProviderError::Request(e.to_string())
        })?;

        let response = check_status(response).await?;

        let parsed = response.json::<ChatCompletionResponse>().await.map_err(|e| {
            error!(error = %e, "failed to deserialize LLM response");
            ProviderError::Request(format!("failed to parse response body: {e}"))
        })?;

        debug!(choices = parsed.choices.len(), "received LLM response");

        first_choice_text(parsed)
    }
}

fn first_choice_text(parsed: ChatCompletionResponse) -> Result<String, ProviderError> {
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ProviderError::Request("empty or missing content in response".into()))
}

// ── Private wire types ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// Error envelope used by OpenAI and compatible APIs.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Return the response if successful, or a structured error built from the body.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());

    let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(env) => format!("HTTP {status}: {}", env.error.message),
        Err(_) => format!("HTTP {status}: {body}"),
    };

    error!(%status, %message, "LLM request returned HTTP error");
    Err(ProviderError::Request(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serialises_roles_in_order() {
        let msgs = [
            Message::user("best beaches?"),
            Message::assistant("(Your preferences so far: none)"),
        ];
        let payload = ChatCompletionRequest {
            model: "llama3.2:latest",
            messages: msgs
                .iter()
                .map(|m| WireMessage { role: m.role.as_str(), content: &m.content })
                .collect(),
            temperature: 0.2,
        };
        let v = serde_json::to_value(&payload).unwrap();
        assert_eq!(v["model"], "llama3.2:latest");
        assert_eq!(v["messages"][0]["role"], "user");
        assert_eq!(v["messages"][1]["role"], "assistant");
        assert_eq!(v["messages"][1]["content"], "(Your preferences so far: none)");
    }

    #[test]
    fn first_choice_is_trimmed() {
        let parsed: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"  Try Goa.\n"}}]}"#,
        )
        .unwrap();
        assert_eq!(first_choice_text(parsed).unwrap(), "Try Goa.");
    }

    #[test]
    fn empty_content_is_an_error() {
        let parsed: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"   "}}]}"#).unwrap();
        assert!(first_choice_text(parsed).is_err());

        let parsed: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(first_choice_text(parsed).is_err());
    }

    #[tokio::test]
    async fn unreachable_endpoint_propagates_request_error() {
        let p = OpenAiCompatibleProvider::new(
            "http://127.0.0.1:9/v1/chat/completions".into(),
            "test-model".into(),
            0.0,
            1,
            None,
        )
        .unwrap();
        let err = p.complete(&[Message::user("hi")]).await.unwrap_err();
        assert!(matches!(err, ProviderError::Request(_)));
    }
}

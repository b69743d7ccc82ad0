//! LLM provider implementations.
//!
//! `build(config, api_key)` is the factory — called at startup.
//! Adding a new backend = new module + new match arm.

pub mod dummy;
pub mod openai_compatible;

use tracing::debug;

use crate::config::LlmConfig;
use crate::llm::{LlmProvider, ProviderError};

/// Construct a `LlmProvider` from config and an optional API key.
///
/// `api_key` is sourced from `LLM_API_KEY` env (never TOML) and is `None`
/// for keyless local models such as Ollama.
pub fn build(config: &LlmConfig, api_key: Option<String>) -> Result<LlmProvider, ProviderError> {
    match config.provider.as_str() {
        "dummy" => Ok(LlmProvider::Dummy(dummy::DummyProvider)),
        "openai" | "openai-compatible" | "ollama" => {
            let oai = &config.openai;
            debug!(url = %oai.api_base_url, model = %oai.model, "building openai-compatible provider");
            let p = openai_compatible::OpenAiCompatibleProvider::new(
                oai.api_base_url.clone(),
                oai.model.clone(),
                oai.temperature,
                oai.timeout_seconds,
                api_key,
            )?;
            Ok(LlmProvider::OpenAiCompatible(p))
        }
        _ => Err(ProviderError::UnknownProvider(config.provider.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn llm_config(provider: &str) -> LlmConfig {
        let mut cfg = Config::test_default(std::path::Path::new("/tmp")).llm;
        cfg.provider = provider.into();
        cfg
    }

    #[test]
    fn builds_dummy() {
        let p = build(&llm_config("dummy"), None).unwrap();
        assert!(matches!(p, LlmProvider::Dummy(_)));
    }

    #[test]
    fn ollama_is_an_openai_compatible_alias() {
        let p = build(&llm_config("ollama"), None).unwrap();
        match p {
            LlmProvider::OpenAiCompatible(p) => assert_eq!(p.model(), "test-model"),
            other => panic!("unexpected provider: {other:?}"),
        }
    }

    #[test]
    fn unknown_provider_errors() {
        let err = build(&llm_config("mystery"), None).unwrap_err();
        assert!(matches!(err, ProviderError::UnknownProvider(name) if name == "mystery"));
    }
}

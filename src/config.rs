//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory
//! (or an explicit path), then applies `TRAVEL_ROUTER_WORK_DIR`,
//! `TRAVEL_ROUTER_LOG_LEVEL` and `TRAVEL_ROUTER_THREAD_ID` env overrides.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::level_filters::LevelFilter;

use crate::error::AppError;
use crate::logger;

/// OpenAI / OpenAI-compatible provider configuration.
/// Populated from `[llm.openai]` in the TOML.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Full chat completions endpoint URL.
    pub api_base_url: String,
    /// Model name passed in the request body.
    pub model: String,
    pub temperature: f32,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

/// LLM (responder) configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Which provider is active (e.g. `"dummy"`, `"openai"`, `"ollama"`).
    /// Maps to `default` in `[llm]` TOML.
    pub provider: String,
    pub openai: OpenAiConfig,
}

/// Where conversation checkpoints live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckpointKind {
    /// `{work_dir}/threads/{thread_id}/state.json`
    Json,
    /// Process-local only; lost on exit.
    Memory,
}

#[derive(Debug, Clone)]
pub struct MemoryConfig {
    pub checkpoint: CheckpointKind,
    /// Conversation thread resumed at startup.
    pub thread_id: String,
}

/// Fully-resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_name: String,
    /// Working directory for all persistent data (already expanded, no `~`).
    pub work_dir: PathBuf,
    /// Validated at load time; a bad level is a config error.
    pub log_level: LevelFilter,
    pub llm: LlmConfig,
    /// API key from `LLM_API_KEY` env var — `None` for keyless local models.
    /// Never sourced from TOML.
    pub llm_api_key: Option<String>,
    pub memory: MemoryConfig,
}

impl Config {
    /// Directory holding per-thread checkpoint folders.
    pub fn threads_dir(&self) -> PathBuf {
        self.work_dir.join("threads")
    }
}

/// Env-var overrides applied on top of the TOML file.
#[derive(Debug, Default, Clone)]
pub struct Overrides<'a> {
    pub work_dir: Option<&'a str>,
    pub log_level: Option<&'a str>,
    pub thread_id: Option<&'a str>,
}

/// Raw TOML shape — `serde` target before resolution.
#[derive(Deserialize)]
struct RawConfig {
    supervisor: RawSupervisor,
    #[serde(default)]
    llm: RawLlm,
    #[serde(default)]
    memory: RawMemory,
}

#[derive(Deserialize)]
struct RawSupervisor {
    bot_name: String,
    work_dir: String,
    log_level: String,
}

#[derive(Deserialize)]
struct RawLlm {
    /// Maps to `default = "..."` in `[llm]`.
    #[serde(rename = "default", default = "default_llm_provider")]
    provider: String,
    #[serde(default)]
    openai: RawOpenAiConfig,
}

impl Default for RawLlm {
    fn default() -> Self {
        Self { provider: default_llm_provider(), openai: RawOpenAiConfig::default() }
    }
}

#[derive(Deserialize)]
struct RawOpenAiConfig {
    #[serde(default = "default_openai_api_base_url")]
    api_base_url: String,
    #[serde(default = "default_openai_model")]
    model: String,
    #[serde(default = "default_openai_temperature")]
    temperature: f32,
    #[serde(default = "default_openai_timeout_seconds")]
    timeout_seconds: u64,
}

impl Default for RawOpenAiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_openai_api_base_url(),
            model: default_openai_model(),
            temperature: default_openai_temperature(),
            timeout_seconds: default_openai_timeout_seconds(),
        }
    }
}

#[derive(Deserialize)]
struct RawMemory {
    /// `"json"` or `"memory"`.
    #[serde(default = "default_checkpoint")]
    checkpoint: String,
    #[serde(default = "default_thread_id")]
    thread_id: String,
}

impl Default for RawMemory {
    fn default() -> Self {
        Self { checkpoint: default_checkpoint(), thread_id: default_thread_id() }
    }
}

fn default_llm_provider() -> String { "dummy".to_string() }
// Ollama's OpenAI-compatible endpoint.
fn default_openai_api_base_url() -> String { "http://localhost:11434/v1/chat/completions".to_string() }
fn default_openai_model() -> String { "llama3.2:latest".to_string() }
fn default_openai_temperature() -> f32 { 0.2 }
fn default_openai_timeout_seconds() -> u64 { 60 }
fn default_checkpoint() -> String { "json".to_string() }
fn default_thread_id() -> String { "default".to_string() }

/// Load config from `path` (or `config/default.toml`), then apply env-var overrides.
pub fn load(path: Option<&str>) -> Result<Config, AppError> {
    let work_dir = env::var("TRAVEL_ROUTER_WORK_DIR").ok();
    let log_level = env::var("TRAVEL_ROUTER_LOG_LEVEL").ok();
    let thread_id = env::var("TRAVEL_ROUTER_THREAD_ID").ok();
    load_from(
        Path::new(path.unwrap_or("config/default.toml")),
        Overrides {
            work_dir: work_dir.as_deref(),
            log_level: log_level.as_deref(),
            thread_id: thread_id.as_deref(),
        },
    )
}

/// Internal loader — accepts an explicit path and optional overrides.
/// Tests pass overrides directly instead of mutating env vars.
pub fn load_from(path: &Path, overrides: Overrides<'_>) -> Result<Config, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

    let parsed: RawConfig = toml::from_str(&raw)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    let s = parsed.supervisor;

    let work_dir = expand_home(overrides.work_dir.unwrap_or(&s.work_dir));
    let log_level = logger::parse_level(overrides.log_level.unwrap_or(&s.log_level))?;

    let checkpoint = match parsed.memory.checkpoint.as_str() {
        "json" => CheckpointKind::Json,
        "memory" => CheckpointKind::Memory,
        other => {
            return Err(AppError::Config(format!(
                "unknown checkpoint backend '{other}' (expected \"json\" or \"memory\")"
            )));
        }
    };
    let thread_id = overrides
        .thread_id
        .unwrap_or(&parsed.memory.thread_id)
        .to_string();

    Ok(Config {
        bot_name: s.bot_name,
        work_dir,
        log_level,
        llm: LlmConfig {
            provider: parsed.llm.provider,
            openai: OpenAiConfig {
                api_base_url: parsed.llm.openai.api_base_url,
                model: parsed.llm.openai.model,
                temperature: parsed.llm.openai.temperature,
                timeout_seconds: parsed.llm.openai.timeout_seconds,
            },
        },
        llm_api_key: env::var("LLM_API_KEY").ok(),
        memory: MemoryConfig { checkpoint, thread_id },
    })
}

/// Expand a leading `~` to the user's home directory.
/// Absolute or relative paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

// ── test helpers ──────────────────────────────────────────────────────────────

/// Safe `Config` for unit tests — dummy LLM, no API keys, no external calls.
#[cfg(test)]
impl Config {
    pub fn test_default(work_dir: &Path) -> Self {
        Self {
            bot_name: "test".into(),
            work_dir: work_dir.to_path_buf(),
            log_level: LevelFilter::INFO,
            llm: LlmConfig {
                provider: "dummy".into(),
                openai: OpenAiConfig {
                    api_base_url: "http://localhost:0/v1/chat/completions".into(),
                    model: "test-model".into(),
                    temperature: 0.0,
                    timeout_seconds: 1,
                },
            },
            llm_api_key: None,
            memory: MemoryConfig {
                checkpoint: CheckpointKind::Memory,
                thread_id: "test".into(),
            },
        }
    }
}

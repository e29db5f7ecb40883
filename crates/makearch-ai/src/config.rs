//! Generation configuration from environment variables.

use anyhow::{Context, Result};
use tracing::warn;

use crate::client::{
    LlmProvider, DEFAULT_ANTHROPIC_BASE, DEFAULT_ANTHROPIC_MODEL, DEFAULT_OPENAI_BASE,
    DEFAULT_OPENAI_MODEL,
};

/// Output-length ceiling sent with every completion request.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2000;

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub provider: LlmProvider,
    pub max_output_tokens: u32,
}

impl AiConfig {
    /// Read provider and limits from the environment.
    ///
    /// A missing API key is not an error: the client is still built and every
    /// generation will be rejected by the provider instead.
    pub fn from_env() -> Result<Self> {
        let forced = std::env::var("LLM_PROVIDER").ok();
        let openai_key = std::env::var("OPENAI_API_KEY").ok();

        let use_openai = match forced.as_deref() {
            Some("openai") => true,
            Some("anthropic") => false,
            Some(other) => anyhow::bail!("Invalid LLM_PROVIDER '{}'", other),
            None => openai_key.is_some(),
        };

        let provider = if use_openai {
            LlmProvider::OpenAI {
                api_key: openai_key.unwrap_or_else(|| {
                    warn!("OPENAI_API_KEY not set; generations will fail");
                    String::new()
                }),
                model: std::env::var("OPENAI_MODEL")
                    .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
                base_url: base_url_from_env("OPENAI_API_BASE", DEFAULT_OPENAI_BASE)?,
            }
        } else {
            LlmProvider::Anthropic {
                api_key: std::env::var("ANTHROPIC_API_KEY").unwrap_or_else(|_| {
                    warn!("ANTHROPIC_API_KEY not set; generations will fail");
                    String::new()
                }),
                model: std::env::var("ANTHROPIC_MODEL")
                    .unwrap_or_else(|_| DEFAULT_ANTHROPIC_MODEL.to_string()),
                base_url: base_url_from_env("ANTHROPIC_API_BASE", DEFAULT_ANTHROPIC_BASE)?,
            }
        };

        Ok(Self {
            provider,
            max_output_tokens: std::env::var("MAX_OUTPUT_TOKENS")
                .unwrap_or_else(|_| DEFAULT_MAX_OUTPUT_TOKENS.to_string())
                .parse()
                .context("Invalid MAX_OUTPUT_TOKENS")?,
        })
    }
}

fn base_url_from_env(key: &str, default: &str) -> Result<String> {
    let value = std::env::var(key).unwrap_or_else(|_| default.to_string());
    url::Url::parse(&value).with_context(|| format!("Invalid {}", key))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Serialize env-mutating tests to avoid races.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [
            "LLM_PROVIDER",
            "ANTHROPIC_API_KEY",
            "ANTHROPIC_MODEL",
            "ANTHROPIC_API_BASE",
            "OPENAI_API_KEY",
            "OPENAI_MODEL",
            "OPENAI_API_BASE",
            "MAX_OUTPUT_TOKENS",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn from_env_defaults_without_keys() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env();

        let config = AiConfig::from_env().unwrap();
        assert_eq!(config.max_output_tokens, 2000);
        match config.provider {
            LlmProvider::Anthropic {
                api_key,
                model,
                base_url,
            } => {
                assert!(api_key.is_empty());
                assert_eq!(model, DEFAULT_ANTHROPIC_MODEL);
                assert_eq!(base_url, DEFAULT_ANTHROPIC_BASE);
            }
            other => panic!("Expected Anthropic provider, got {:?}", other),
        }

        clear_env();
    }

    #[test]
    fn from_env_anthropic_overrides() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env();

        std::env::set_var("ANTHROPIC_API_KEY", "sk-ant");
        std::env::set_var("ANTHROPIC_MODEL", "claude-test");
        std::env::set_var("ANTHROPIC_API_BASE", "http://localhost:8080");
        std::env::set_var("MAX_OUTPUT_TOKENS", "512");

        let config = AiConfig::from_env().unwrap();
        assert_eq!(config.max_output_tokens, 512);
        assert!(matches!(
            config.provider,
            LlmProvider::Anthropic { ref api_key, ref model, ref base_url }
                if api_key == "sk-ant" && model == "claude-test" && base_url == "http://localhost:8080"
        ));

        clear_env();
    }

    #[test]
    fn from_env_prefers_openai_when_key_present() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env();

        std::env::set_var("OPENAI_API_KEY", "sk-openai");
        std::env::set_var("ANTHROPIC_API_KEY", "sk-ant");

        let config = AiConfig::from_env().unwrap();
        assert_eq!(config.provider.name(), "openai");
        assert_eq!(config.provider.model(), DEFAULT_OPENAI_MODEL);

        clear_env();
    }

    #[test]
    fn from_env_forced_provider() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env();

        std::env::set_var("OPENAI_API_KEY", "sk-openai");
        std::env::set_var("LLM_PROVIDER", "anthropic");

        let config = AiConfig::from_env().unwrap();
        assert_eq!(config.provider.name(), "anthropic");

        std::env::set_var("LLM_PROVIDER", "mistral");
        assert!(AiConfig::from_env().is_err());

        clear_env();
    }

    #[test]
    fn from_env_invalid_values() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env();

        std::env::set_var("MAX_OUTPUT_TOKENS", "lots");
        assert!(AiConfig::from_env().is_err());

        std::env::remove_var("MAX_OUTPUT_TOKENS");
        std::env::set_var("ANTHROPIC_API_BASE", "not a url");
        assert!(AiConfig::from_env().is_err());

        clear_env();
    }
}

//! Scenario generation: one prompt, one completion, one parsed scenario.

use std::sync::Arc;

use makearch_scenario::AutomationScenario;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::client::{CompletionProvider, CompletionRequest};
use crate::config::{AiConfig, DEFAULT_MAX_OUTPUT_TOKENS};
use crate::error::GenerationError;
use crate::prompt::{build_scenario_prompt, parse_scenario_response};
use crate::LlmClient;

/// Scenarios are expected to carry at least this many AI-powered modules.
/// Fewer is logged, not rejected.
pub const EXPECTED_AI_MODULES: usize = 2;

/// Turns a free-text automation need into a validated scenario.
///
/// Stateless apart from the injected provider, so a single instance can
/// serve concurrent callers.
#[derive(Clone)]
pub struct ScenarioGenerator {
    provider: Arc<dyn CompletionProvider>,
    max_output_tokens: u32,
}

impl ScenarioGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    /// Build a generator backed by a real [`LlmClient`].
    pub fn from_config(config: AiConfig) -> Self {
        info!(
            "Using {} provider with model {}",
            config.provider.name(),
            config.provider.model()
        );
        Self::new(Arc::new(LlmClient::new(config.provider)))
            .with_max_output_tokens(config.max_output_tokens)
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    /// Generate a scenario for `input`.
    ///
    /// Empty input fails with [`GenerationError::InvalidInput`] before any
    /// upstream call.
    pub async fn generate(&self, input: &str) -> Result<AutomationScenario, GenerationError> {
        if input.is_empty() {
            return Err(GenerationError::InvalidInput);
        }

        let span = info_span!("generate", generation_id = %Uuid::new_v4());
        self.generate_inner(input).instrument(span).await
    }

    async fn generate_inner(&self, input: &str) -> Result<AutomationScenario, GenerationError> {
        let request = CompletionRequest {
            prompt: build_scenario_prompt(input),
            max_tokens: self.max_output_tokens,
        };
        debug!(input_len = input.len(), "Requesting scenario");

        let completion = self.provider.complete(&request).await.map_err(|e| {
            let reason = format!("{:#}", e);
            error!(error = %reason, "Upstream completion failed");
            GenerationError::UpstreamFailure { reason }
        })?;

        let text = completion.into_text();
        let scenario = parse_scenario_response(&text).inspect_err(|e| {
            error!(error = %e, response_len = text.len(), "Could not parse scenario");
        })?;

        let ai_modules = scenario.ai_module_count();
        if ai_modules < EXPECTED_AI_MODULES {
            warn!(
                ai_modules,
                "Scenario has fewer AI-powered modules than requested"
            );
        }

        info!(
            modules = scenario.modules.len(),
            ai_modules, "Generated scenario '{}'", scenario.title
        );
        Ok(scenario)
    }
}

//! Where the shell sends its generation requests.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use makearch_ai::ScenarioGenerator;
use makearch_scenario::{AutomationScenario, GenerationRequest};

#[async_trait]
pub trait ScenarioBackend: Send + Sync {
    async fn generate(&self, input: &str) -> Result<AutomationScenario>;
}

/// Generates in-process with a [`ScenarioGenerator`].
pub struct LocalBackend {
    generator: ScenarioGenerator,
}

impl LocalBackend {
    pub fn new(generator: ScenarioGenerator) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl ScenarioBackend for LocalBackend {
    async fn generate(&self, input: &str) -> Result<AutomationScenario> {
        Ok(self.generator.generate(input).await?)
    }
}

/// Calls a running makearch server.
pub struct RemoteBackend {
    endpoint: url::Url,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct GenerateResponse {
    scenario: AutomationScenario,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl RemoteBackend {
    pub fn new(server_url: &str) -> Result<Self> {
        let mut base = server_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let endpoint = url::Url::parse(&base)
            .and_then(|u| u.join("api/generate"))
            .with_context(|| format!("Invalid server URL '{}'", server_url))?;

        Ok(Self {
            endpoint,
            http: reqwest::Client::new(),
        })
    }

    #[cfg(test)]
    pub fn endpoint(&self) -> &url::Url {
        &self.endpoint
    }
}

#[async_trait]
impl ScenarioBackend for RemoteBackend {
    async fn generate(&self, input: &str) -> Result<AutomationScenario> {
        debug!("Posting generation request to {}", self.endpoint);

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&GenerationRequest::new(input))
            .send()
            .await
            .context("Generation request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error = response
                .json::<ErrorBody>()
                .await
                .map(|b| b.error)
                .unwrap_or_default();
            anyhow::bail!("Server returned {}: {}", status, error);
        }

        let body: GenerateResponse = response
            .json()
            .await
            .context("Invalid generation response body")?;
        Ok(body.scenario)
    }
}

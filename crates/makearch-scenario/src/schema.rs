//! Automation scenario schema: the structured result of a generation

use serde::{Deserialize, Serialize};

/// Body of a generation request.
///
/// `input` is optional on the wire so that a missing field can be reported
/// as invalid input rather than as a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
}

impl GenerationRequest {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: Some(input.into()),
        }
    }
}

/// One step of a proposed automation. Its position in
/// [`AutomationScenario::modules`] is its execution order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModuleStep {
    pub name: String,
    pub description: String,
    /// Whether this step is AI-powered
    #[serde(rename = "hasAI")]
    pub has_ai: bool,
}

/// A proposed automation workflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AutomationScenario {
    pub title: String,
    pub description: String,
    /// Ordered steps of the automation.
    pub modules: Vec<ModuleStep>,
    /// Narrative on how AI is used across the scenario.
    pub ai_integration: String,
    /// Practical implementation tips (three by convention).
    pub tips: Vec<String>,
}

impl AutomationScenario {
    /// Number of AI-powered modules.
    pub fn ai_module_count(&self) -> usize {
        self.modules.iter().filter(|m| m.has_ai).count()
    }

    /// AI-powered modules with their 1-based position.
    pub fn ai_modules(&self) -> impl Iterator<Item = (usize, &ModuleStep)> {
        self.modules
            .iter()
            .enumerate()
            .filter(|(_, m)| m.has_ai)
            .map(|(i, m)| (i + 1, m))
    }
}

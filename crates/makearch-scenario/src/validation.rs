//! Structural validation for generated scenarios

use crate::schema::AutomationScenario;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScenarioValidationError {
    #[error("Scenario title cannot be empty")]
    EmptyTitle,

    #[error("Scenario must have at least one module")]
    EmptyModules,

    #[error("Module {0} must have a name")]
    EmptyModuleName(usize),
}

/// Validate a parsed scenario, collecting every violation.
pub fn validate_scenario(scenario: &AutomationScenario) -> Result<(), Vec<ScenarioValidationError>> {
    let mut errors = Vec::new();

    if scenario.title.trim().is_empty() {
        errors.push(ScenarioValidationError::EmptyTitle);
    }

    if scenario.modules.is_empty() {
        errors.push(ScenarioValidationError::EmptyModules);
    }

    for (i, module) in scenario.modules.iter().enumerate() {
        if module.name.trim().is_empty() {
            errors.push(ScenarioValidationError::EmptyModuleName(i + 1));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

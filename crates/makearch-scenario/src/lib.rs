//! makearch Scenario - automation scenario schema and validation
//!
//! This crate defines the structured shape a generated automation scenario
//! must follow, and the structural checks applied after parsing it.

pub mod schema;
pub mod validation;

pub use schema::{AutomationScenario, GenerationRequest, ModuleStep};
pub use validation::{validate_scenario, ScenarioValidationError};

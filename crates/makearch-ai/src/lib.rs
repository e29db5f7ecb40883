//! makearch AI - LLM integration for automation scenario generation
//!
//! This crate provides:
//! - LLM API client (Anthropic/OpenAI) behind the [`CompletionProvider`] seam
//! - Prompt building for scenario generation
//! - Response sanitization and parsing into an [`AutomationScenario`]
//! - The [`ScenarioGenerator`] tying them together
//!
//! [`AutomationScenario`]: makearch_scenario::AutomationScenario

pub mod client;
pub mod config;
pub mod error;
pub mod generator;
pub mod prompt;

pub use client::{Completion, CompletionProvider, CompletionRequest, LlmClient, LlmProvider};
pub use config::AiConfig;
pub use error::GenerationError;
pub use generator::ScenarioGenerator;

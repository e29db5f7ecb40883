//! Prompt building and response parsing for scenario generation

use makearch_scenario::{validate_scenario, AutomationScenario};

use crate::error::GenerationError;

const FENCE: &str = "```";

/// Instruction template; `{input}` is replaced by the user's description.
const SCENARIO_TEMPLATE: &str = r#"Tu es un architecte expert en automatisation sur Make.com, spécialisé dans l'intégration de l'Intelligence Artificielle au cœur des scénarios.

Mission : concevoir un scénario Make complet et intelligent qui répond à ce besoin :
"{input}"

Instructions :
- Propose un scénario Make avec des modules précis et réalistes, dans l'ordre d'exécution
- Intègre OBLIGATOIREMENT de l'IA (OpenAI, Claude ou autre) dans au moins 2 à 3 modules clés
- Sois créatif, flexible et inventif
- Ne t'enferme pas dans des règles techniques strictes
- Demande-toi comment l'IA peut rendre ce scénario vraiment intelligent

Réponds UNIQUEMENT avec un JSON valide dans ce format exact (sans markdown, sans backticks) :
{
  "title": "Titre du scénario",
  "description": "Description courte et claire",
  "modules": [
    {
      "name": "Nom du module Make",
      "description": "Ce que fait ce module",
      "hasAI": true/false
    }
  ],
  "aiIntegration": "Explication détaillée de la façon dont l'IA est utilisée dans ce scénario",
  "tips": [
    "Conseil pratique 1",
    "Conseil pratique 2",
    "Conseil pratique 3"
  ]
}

IMPORTANT : ta réponse doit être un JSON pur, sans texte avant ou après, sans ```json ni ```."#;

/// Build the full instruction sent to the model. The input is embedded verbatim.
pub fn build_scenario_prompt(input: &str) -> String {
    SCENARIO_TEMPLATE.replacen("{input}", input, 1)
}

/// Strip surrounding code fences (with or without a language tag) and
/// surrounding whitespace. Text without a leading fence is only trimmed.
///
/// Nested fences are peeled until the text no longer starts with one, so the
/// result is stable under a second pass.
pub fn sanitize_response(response: &str) -> &str {
    let mut text = response.trim();
    while let Some(rest) = text.strip_prefix(FENCE) {
        // Skip the language tag, e.g. ```json
        let body_start = rest
            .find(|c: char| c.is_whitespace() || c == '{' || c == '[')
            .unwrap_or(rest.len());
        let body = &rest[body_start..];
        let body = body.strip_suffix(FENCE).unwrap_or(body);
        text = body.trim();
    }
    text
}

/// Parse a model response into a validated scenario.
pub fn parse_scenario_response(response: &str) -> Result<AutomationScenario, GenerationError> {
    let json_str = sanitize_response(response);

    let scenario: AutomationScenario =
        serde_json::from_str(json_str).map_err(|e| GenerationError::MalformedResponse {
            reason: format!("invalid scenario JSON: {}", e),
        })?;

    validate_scenario(&scenario).map_err(|errors| GenerationError::MalformedResponse {
        reason: errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; "),
    })?;

    Ok(scenario)
}

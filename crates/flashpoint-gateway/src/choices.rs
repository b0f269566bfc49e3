//! Decision-choice generation agent.

use serde::Deserialize;

use crate::error::{GatewayError, Result};
use crate::gemini::GeminiClient;
use crate::prompts::render_choices_prompt;

/// Generates the decision choices presented to the trainee.
#[derive(Clone)]
pub struct DecisionChoicesAgent {
    client: GeminiClient,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DecisionChoicesResponse {
    decision_choices: Vec<String>,
}

impl DecisionChoicesAgent {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    /// Generates choices for the given scenario narrative.
    ///
    /// Guarantees a non-empty list of distinct, trimmed action strings;
    /// anything else from the generator is `MalformedOutput`.
    pub async fn generate(&self, scenario_description: &str) -> Result<Vec<String>> {
        let prompt = render_choices_prompt(scenario_description)?;
        let response: DecisionChoicesResponse = self.client.generate_json(&prompt).await?;
        normalize_choices(response.decision_choices)
    }
}

/// Trims entries, drops blanks, dedups preserving order.
fn normalize_choices(raw: Vec<String>) -> Result<Vec<String>> {
    let mut seen = std::collections::HashSet::new();
    let choices: Vec<String> = raw
        .into_iter()
        .map(|choice| choice.trim().to_string())
        .filter(|choice| !choice.is_empty())
        .filter(|choice| seen.insert(choice.clone()))
        .collect();

    if choices.is_empty() {
        return Err(GatewayError::MalformedOutput(
            "generator returned no usable decision choices".to_string(),
        ));
    }
    Ok(choices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_dedups() {
        let choices = normalize_choices(vec![
            "  Evacuate ".to_string(),
            "Evacuate".to_string(),
            "Wait".to_string(),
            "".to_string(),
        ])
        .unwrap();
        assert_eq!(choices, vec!["Evacuate", "Wait"]);
    }

    #[test]
    fn test_normalize_rejects_all_blank() {
        let err = normalize_choices(vec!["  ".to_string(), "".to_string()]).unwrap_err();
        assert!(matches!(err, GatewayError::MalformedOutput(_)));
    }

    #[test]
    fn test_response_parses_camel_case() {
        let raw = r#"{"decisionChoices": ["A", "B", "C"]}"#;
        let response: DecisionChoicesResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.decision_choices.len(), 3);
    }
}

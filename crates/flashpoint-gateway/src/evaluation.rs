//! Decision evaluation agent.

use flashpoint_core::evaluation::DecisionEvaluation;
use flashpoint_core::gateway::EvaluationRequest;

use crate::error::{GatewayError, Result};
use crate::gemini::GeminiClient;
use crate::prompts::render_evaluation_prompt;

/// Scores a trainee's chosen action against the scenario's scoring
/// dimensions.
#[derive(Clone)]
pub struct DecisionEvaluationAgent {
    client: GeminiClient,
}

impl DecisionEvaluationAgent {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    /// Runs one evaluation. Out-of-range numbers from the generator fail
    /// here as `MalformedOutput` rather than reaching the session.
    pub async fn evaluate(&self, request: &EvaluationRequest) -> Result<DecisionEvaluation> {
        let prompt = render_evaluation_prompt(request)?;
        let evaluation: DecisionEvaluation = self.client.generate_json(&prompt).await?;
        evaluation
            .validate()
            .map_err(|err| GatewayError::MalformedOutput(err.to_string()))?;
        Ok(evaluation)
    }
}

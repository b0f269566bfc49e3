//! Generation gateway contract.
//!
//! The core treats the generative backend as a black box behind this trait:
//! request in, structured result out, or failure. The shipped implementation
//! lives in `flashpoint-gateway`; tests substitute mocks.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::evaluation::DecisionEvaluation;
use crate::media::{GeneratedImage, OutcomeVideo};

/// Inputs for scoring a trainee's chosen action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRequest {
    /// Narrative text of the scenario being trained.
    pub scenario_description: String,
    /// All choices that were presented.
    pub available_choices: Vec<String>,
    /// The choice the trainee selected.
    pub user_choice: String,
    /// Free-text descriptor of the axes to score on.
    pub scoring_dimensions: String,
}

/// The external generative-model service.
///
/// All operations are asynchronous and non-cancellable once issued. Callers
/// own the failure policy: the session layer absorbs choice/evaluation
/// failures with mock data, and lets media failures degrade the display only.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    /// Generates decision choices for a scenario.
    ///
    /// On success the list is non-empty, distinct and human-readable
    /// (typically three entries, order randomized by the generator).
    async fn generate_choices(&self, scenario_description: &str) -> Result<Vec<String>>;

    /// Scores a chosen action and produces "- "-delimited feedback, plus
    /// the extended accuracy/confidence/six-axis breakdown when the
    /// generator provides it.
    async fn evaluate_decision(&self, request: EvaluationRequest) -> Result<DecisionEvaluation>;

    /// Synthesizes a short video of the decision's immediate consequence.
    ///
    /// Internally this may run a prompt-generation step and poll a remote
    /// job to completion; callers only observe "resolves or fails".
    async fn generate_outcome_video(
        &self,
        scenario_description: &str,
        user_choice: &str,
    ) -> Result<OutcomeVideo>;

    /// Generates a visual-narrative image set for a scenario.
    ///
    /// Partial failure returns the surviving subset; if every generation
    /// fails while at least one was requested, the call fails explicitly
    /// rather than returning an empty result.
    async fn generate_scenario_images(
        &self,
        scenario_description: &str,
        image_count: usize,
    ) -> Result<Vec<GeneratedImage>>;
}

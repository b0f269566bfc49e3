//! Gemini-backed implementation of the generation gateway.
//!
//! The agents in this crate talk to the Gemini REST API directly; no SDK.
//! `GeminiGateway` bundles them behind the `GenerationGateway` contract
//! from `flashpoint-core`.

pub mod choices;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod gemini;
pub mod images;
mod prompts;
pub mod video;

pub use config::GatewayConfig;
pub use error::GatewayError;

use async_trait::async_trait;

use flashpoint_core::evaluation::DecisionEvaluation;
use flashpoint_core::gateway::{EvaluationRequest, GenerationGateway};
use flashpoint_core::media::{GeneratedImage, OutcomeVideo};

use crate::choices::DecisionChoicesAgent;
use crate::evaluation::DecisionEvaluationAgent;
use crate::gemini::GeminiClient;
use crate::images::ScenarioImagesAgent;
use crate::video::OutcomeVideoAgent;

/// The production generation gateway over the Gemini API family
/// (text, Veo video, Imagen images).
pub struct GeminiGateway {
    choices: DecisionChoicesAgent,
    evaluation: DecisionEvaluationAgent,
    video: OutcomeVideoAgent,
    images: ScenarioImagesAgent,
}

impl GeminiGateway {
    /// Builds all agents from one resolved configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let text_client = GeminiClient::new(config.api_key.clone(), config.text_model.clone());
        Self {
            choices: DecisionChoicesAgent::new(text_client.clone()),
            evaluation: DecisionEvaluationAgent::new(text_client.clone()),
            video: OutcomeVideoAgent::new(
                text_client.clone(),
                config.api_key.clone(),
                config.video_model.clone(),
                config.poll_interval,
            ),
            images: ScenarioImagesAgent::new(text_client, config.api_key, config.image_model),
        }
    }
}

#[async_trait]
impl GenerationGateway for GeminiGateway {
    async fn generate_choices(&self, scenario_description: &str) -> anyhow::Result<Vec<String>> {
        Ok(self.choices.generate(scenario_description).await?)
    }

    async fn evaluate_decision(
        &self,
        request: EvaluationRequest,
    ) -> anyhow::Result<DecisionEvaluation> {
        Ok(self.evaluation.evaluate(&request).await?)
    }

    async fn generate_outcome_video(
        &self,
        scenario_description: &str,
        user_choice: &str,
    ) -> anyhow::Result<OutcomeVideo> {
        Ok(self.video.generate(scenario_description, user_choice).await?)
    }

    async fn generate_scenario_images(
        &self,
        scenario_description: &str,
        image_count: usize,
    ) -> anyhow::Result<Vec<GeneratedImage>> {
        Ok(self
            .images
            .generate(scenario_description, image_count)
            .await?)
    }
}

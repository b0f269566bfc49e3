//! Prompt templates for the generation operations.
//!
//! Templates instruct the model to answer with bare JSON matching the
//! schema each agent deserializes; `extract_json_block` upstream tolerates
//! a stray code fence anyway.

use minijinja::{Environment, context};
use once_cell::sync::Lazy;

use crate::error::{GatewayError, Result};
use flashpoint_core::gateway::EvaluationRequest;

const DECISION_CHOICES_TEMPLATE: &str = r#"You are an AI assistant creating a training simulation for amateur emergency response officers.

Your task is to generate exactly three challenging and tricky decision choices for the given emergency scenario. These choices will be presented to the trainee.

The options should be framed from the perspective of an officer arriving at the scene.

Your goal is to test their decision-making skills. To do this, structure the three choices as follows:
1. The most efficient/correct action: the professionally recommended, best-practice response that balances safety, effectiveness, and resource management.
2. A plausible but less-optimal action: a choice that seems reasonable on the surface but has a hidden flaw, is less efficient, or misses a critical priority.
3. A less preferable action: a choice that is clearly not ideal, potentially unsafe, or a significant misjudgment of the situation.

The choices should be tricky enough to make an amateur officer pause and think. They should be concise, clear, and actionable.

Scenario Description: {{ scenario_description }}

Generate the three choices in randomized order.

Output a JSON object matching this schema:
{ "decisionChoices": ["<choice>", "<choice>", "<choice>"] }

IMPORTANT: Output ONLY valid JSON, no markdown formatting or code blocks."#;

const EVALUATE_DECISION_TEMPLATE: &str = r#"You are an AI assistant evaluating user decisions in emergency scenarios.

Scenario Description: {{ scenario_description }}
Available Choices: {{ available_choices | join(", ") }}
User Choice: {{ user_choice }}
Scoring Dimensions: {{ scoring_dimensions }}

Evaluate the user's choice based on the scenario description and the specified scoring dimensions.
Provide an integer score between 0 and 100 and detailed feedback explaining the consequences of their choice in relation to the scoring dimensions.
Explain why the choice resulted in that score and what could have been done differently.
Write the feedback as plain text where every individual point starts with "- ".
Also rate decisionAccuracy and confidenceLevel (integers 0-100) and a six-axis performanceAnalysis (integers 0-100 each).
Do not include any introductory or concluding remarks.

Output a JSON object matching this schema:
{ "score": 0, "feedback": "- first point\n- second point", "decisionAccuracy": 0, "confidenceLevel": 0, "performanceAnalysis": { "decisionSpeed": 0, "accuracy": 0, "riskAssessment": 0, "resourceManagement": 0, "communication": 0, "safetyProtocols": 0 } }

IMPORTANT: Output ONLY valid JSON, no markdown formatting or code blocks."#;

const VIDEO_PROMPT_TEMPLATE: &str = r#"You are a film director specializing in intense, realistic training simulations.
Your task is to create a single, highly descriptive text-to-video prompt.
This prompt will generate a short video (5-8 seconds) illustrating the immediate, most likely consequence of a user's decision in an emergency scenario.

The prompt should be photorealistic, cinematic, and dramatic. Focus on action and the direct result of the choice.

- Scenario: {{ scenario_description }}
- User's Action: {{ user_choice }}

Generate a single, concise prompt that shows the result of this action. Do not describe the user, only the scene's outcome.
Example: If the action is "Use a fire extinguisher on a grease fire", a good prompt would be "Cinematic shot of a kitchen fire exploding violently as a fire extinguisher is used on it, grease splattering and flames engulfing the room."

Output a JSON object matching this schema:
{ "prompt": "<text-to-video prompt>" }

IMPORTANT: Output ONLY valid JSON, no markdown formatting or code blocks."#;

const IMAGE_PROMPTS_TEMPLATE: &str = r#"Based on the following emergency scenario, generate a sequence of {{ image_count }} distinct, descriptive text-to-image prompts that visually tell a story about the scene.
Each prompt should describe a unique moment or perspective of the scene. Focus on creating photorealistic, cinematic, and impactful images.

Scenario: {{ scenario_description }}

Output a JSON object matching this schema:
{ "prompts": ["<prompt>"] }

IMPORTANT: Output ONLY valid JSON, no markdown formatting or code blocks."#;

static PROMPTS: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    for (name, source) in [
        ("decision_choices", DECISION_CHOICES_TEMPLATE),
        ("evaluate_decision", EVALUATE_DECISION_TEMPLATE),
        ("video_prompt", VIDEO_PROMPT_TEMPLATE),
        ("image_prompts", IMAGE_PROMPTS_TEMPLATE),
    ] {
        env.add_template(name, source)
            .expect("builtin prompt template must compile");
    }
    env
});

fn render(name: &str, ctx: minijinja::Value) -> Result<String> {
    let template = PROMPTS
        .get_template(name)
        .map_err(|err| GatewayError::ExecutionFailed(format!("unknown prompt {name}: {err}")))?;
    template
        .render(ctx)
        .map_err(|err| GatewayError::ExecutionFailed(format!("failed to render {name}: {err}")))
}

pub(crate) fn render_choices_prompt(scenario_description: &str) -> Result<String> {
    render(
        "decision_choices",
        context! { scenario_description => scenario_description },
    )
}

pub(crate) fn render_evaluation_prompt(request: &EvaluationRequest) -> Result<String> {
    render(
        "evaluate_decision",
        context! {
            scenario_description => request.scenario_description,
            available_choices => request.available_choices,
            user_choice => request.user_choice,
            scoring_dimensions => request.scoring_dimensions,
        },
    )
}

pub(crate) fn render_video_prompt(scenario_description: &str, user_choice: &str) -> Result<String> {
    render(
        "video_prompt",
        context! {
            scenario_description => scenario_description,
            user_choice => user_choice,
        },
    )
}

pub(crate) fn render_image_prompts_prompt(
    scenario_description: &str,
    image_count: usize,
) -> Result<String> {
    render(
        "image_prompts",
        context! {
            scenario_description => scenario_description,
            image_count => image_count,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choices_prompt_embeds_scenario() {
        let prompt = render_choices_prompt("A warehouse is on fire.").unwrap();
        assert!(prompt.contains("A warehouse is on fire."));
        assert!(prompt.contains("decisionChoices"));
    }

    #[test]
    fn test_evaluation_prompt_joins_choices() {
        let request = EvaluationRequest {
            scenario_description: "Flooded street.".to_string(),
            available_choices: vec!["Evacuate".to_string(), "Wait".to_string()],
            user_choice: "Wait".to_string(),
            scoring_dimensions: "Safety".to_string(),
        };
        let prompt = render_evaluation_prompt(&request).unwrap();
        assert!(prompt.contains("Evacuate, Wait"));
        assert!(prompt.contains("User Choice: Wait"));
        assert!(prompt.contains("performanceAnalysis"));
    }

    #[test]
    fn test_video_prompt_embeds_action() {
        let prompt = render_video_prompt("Tanker spill.", "Hold the cordon").unwrap();
        assert!(prompt.contains("User's Action: Hold the cordon"));
    }

    #[test]
    fn test_image_prompts_prompt_embeds_count() {
        let prompt = render_image_prompts_prompt("Pileup in fog.", 5).unwrap();
        assert!(prompt.contains('5'));
        assert!(prompt.contains("Pileup in fog."));
    }
}

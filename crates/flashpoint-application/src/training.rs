//! Training session use-case.
//!
//! `TrainingService` issues the gateway requests that drive a session's
//! transitions. Choice and evaluation failures are absorbed by the mock
//! fallback; outcome-media failures only degrade the display.

use std::sync::Arc;

use tracing::warn;

use flashpoint_core::error::Result;
use flashpoint_core::gateway::{EvaluationRequest, GenerationGateway};
use flashpoint_core::scenario::Scenario;
use flashpoint_core::session::Session;

use crate::fallback::{mock_decision_choices, mock_evaluation};

/// Drives one trainee session against a generation gateway.
pub struct TrainingService<G: GenerationGateway> {
    gateway: Arc<G>,
}

impl<G: GenerationGateway> TrainingService<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Starts the simulation: requests choices and enters `Deciding`.
    ///
    /// Generation failure substitutes the fixed mock choices, so a started
    /// session always reaches `Deciding` with a populated list.
    pub async fn start(&self, session: &mut Session, scenario: &Scenario) -> Result<()> {
        let choices = match self.gateway.generate_choices(&scenario.description).await {
            Ok(choices) if !choices.is_empty() => choices,
            Ok(_) => {
                warn!(
                    scenario = %scenario.id,
                    "generator returned no choices, substituting mock choices"
                );
                mock_decision_choices()
            }
            Err(error) => {
                warn!(
                    scenario = %scenario.id,
                    %error,
                    "choice generation failed, substituting mock choices"
                );
                mock_decision_choices()
            }
        };
        session.begin_deciding(choices)
    }

    /// Locks in the choice at `index` and carries the session to `Feedback`.
    ///
    /// The static outcome image is set immediately as the display fallback.
    /// For video-enabled scenarios the outcome-video request runs
    /// concurrently with the evaluation and races it independently; its
    /// failure is logged and the static image stands. Evaluation failure
    /// (or an out-of-range result) substitutes the mock evaluation.
    pub async fn choose(
        &self,
        session: &mut Session,
        scenario: &Scenario,
        index: usize,
    ) -> Result<()> {
        let user_choice = session.select_choice(index)?.to_string();
        session.set_outcome_media(scenario.outcome_media_id_for(index))?;

        let request = EvaluationRequest {
            scenario_description: scenario.description.clone(),
            available_choices: session.choices().to_vec(),
            user_choice: user_choice.clone(),
            scoring_dimensions: scenario.scoring_dimensions.clone(),
        };

        let evaluation_result = if scenario.outcome_video {
            let (evaluation, video) = tokio::join!(
                self.gateway.evaluate_decision(request),
                self.gateway
                    .generate_outcome_video(&scenario.description, &user_choice)
            );
            match video {
                Ok(video) => session.set_outcome_video(video.video_url)?,
                Err(error) => warn!(
                    scenario = %scenario.id,
                    %error,
                    "outcome video generation failed, keeping static image"
                ),
            }
            evaluation
        } else {
            self.gateway.evaluate_decision(request).await
        };

        let evaluation = match evaluation_result {
            Ok(evaluation) if evaluation.validate().is_ok() => evaluation,
            Ok(_) => {
                warn!(
                    scenario = %scenario.id,
                    "evaluation result out of range, substituting mock evaluation"
                );
                mock_evaluation(&user_choice)
            }
            Err(error) => {
                warn!(
                    scenario = %scenario.id,
                    %error,
                    "evaluation failed, substituting mock evaluation"
                );
                mock_evaluation(&user_choice)
            }
        };
        session.complete_evaluation(evaluation)
    }

    /// Returns the session to `Intro`. Always succeeds.
    pub fn reset(&self, session: &mut Session) {
        session.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use flashpoint_core::evaluation::{DecisionEvaluation, PerformanceAnalysis};
    use flashpoint_core::media::{GeneratedImage, OutcomeVideo};
    use flashpoint_core::scenario::builtin_scenarios;
    use flashpoint_core::session::SessionState;

    #[derive(Default)]
    struct MockGateway {
        fail_choices: bool,
        fail_evaluation: bool,
        fail_video: bool,
        invalid_evaluation: bool,
        last_evaluation_request: Mutex<Option<EvaluationRequest>>,
    }

    #[async_trait]
    impl GenerationGateway for MockGateway {
        async fn generate_choices(
            &self,
            _scenario_description: &str,
        ) -> anyhow::Result<Vec<String>> {
            if self.fail_choices {
                anyhow::bail!("generator unreachable");
            }
            Ok(vec![
                "Evacuate".to_string(),
                "Wait".to_string(),
                "Secure area".to_string(),
            ])
        }

        async fn evaluate_decision(
            &self,
            request: EvaluationRequest,
        ) -> anyhow::Result<DecisionEvaluation> {
            *self.last_evaluation_request.lock().unwrap() = Some(request);
            if self.fail_evaluation {
                anyhow::bail!("generator unreachable");
            }
            let score = if self.invalid_evaluation { 180 } else { 85 };
            Ok(DecisionEvaluation {
                score,
                feedback: "- Good call.\n- Watch the wind.".to_string(),
                decision_accuracy: Some(92),
                confidence_level: Some(87),
                performance_analysis: Some(PerformanceAnalysis {
                    decision_speed: 80,
                    accuracy: 90,
                    risk_assessment: 70,
                    resource_management: 60,
                    communication: 75,
                    safety_protocols: 95,
                }),
            })
        }

        async fn generate_outcome_video(
            &self,
            _scenario_description: &str,
            _user_choice: &str,
        ) -> anyhow::Result<OutcomeVideo> {
            if self.fail_video {
                anyhow::bail!("video job failed");
            }
            Ok(OutcomeVideo {
                video_url: "data:video/mp4;base64,AAAA".to_string(),
                outcome_prompt: "Cinematic shot of the outcome.".to_string(),
            })
        }

        async fn generate_scenario_images(
            &self,
            _scenario_description: &str,
            _image_count: usize,
        ) -> anyhow::Result<Vec<GeneratedImage>> {
            Ok(Vec::new())
        }
    }

    fn scenario(id: &str) -> Scenario {
        builtin_scenarios()
            .into_iter()
            .find(|s| s.id == id)
            .unwrap()
    }

    fn service(gateway: MockGateway) -> TrainingService<MockGateway> {
        TrainingService::new(Arc::new(gateway))
    }

    #[tokio::test]
    async fn test_start_populates_generated_choices() {
        let scenario = scenario("flood_rescue_002");
        let service = service(MockGateway::default());
        let mut session = Session::new(&scenario);

        service.start(&mut session, &scenario).await.unwrap();
        assert_eq!(session.state(), SessionState::Deciding);
        assert_eq!(session.choices(), ["Evacuate", "Wait", "Secure area"]);
    }

    #[tokio::test]
    async fn test_start_substitutes_three_mock_choices_on_failure() {
        let scenario = scenario("flood_rescue_002");
        let service = service(MockGateway {
            fail_choices: true,
            ..Default::default()
        });
        let mut session = Session::new(&scenario);

        service.start(&mut session, &scenario).await.unwrap();
        assert_eq!(session.state(), SessionState::Deciding);
        assert_eq!(session.choices().len(), 3);
        assert!(session.choices()[0].starts_with("Mock Decision 1"));
    }

    #[tokio::test]
    async fn test_choose_reaches_feedback_with_evaluation() {
        let scenario = scenario("flood_rescue_002");
        let service = service(MockGateway::default());
        let mut session = Session::new(&scenario);

        service.start(&mut session, &scenario).await.unwrap();
        service.choose(&mut session, &scenario, 1).await.unwrap();

        assert_eq!(session.state(), SessionState::Feedback);
        assert_eq!(session.selected_choice_index(), Some(1));
        assert!(session.response_time_seconds().unwrap() >= 0.0);
        assert_eq!(session.evaluation().unwrap().score, 85);
        assert_eq!(
            session.current_media_id(),
            scenario.outcome_media_id_for(1)
        );
    }

    #[tokio::test]
    async fn test_choose_passes_full_evaluation_request() {
        let scenario = scenario("flood_rescue_002");
        let gateway = Arc::new(MockGateway::default());
        let service = TrainingService::new(gateway.clone());
        let mut session = Session::new(&scenario);

        service.start(&mut session, &scenario).await.unwrap();
        service.choose(&mut session, &scenario, 0).await.unwrap();

        let request = gateway
            .last_evaluation_request
            .lock()
            .unwrap()
            .clone()
            .unwrap();
        assert_eq!(request.scenario_description, scenario.description);
        assert_eq!(request.available_choices.len(), 3);
        assert_eq!(request.user_choice, "Evacuate");
        assert_eq!(request.scoring_dimensions, scenario.scoring_dimensions);
    }

    #[tokio::test]
    async fn test_choose_substitutes_mock_evaluation_on_failure() {
        let scenario = scenario("flood_rescue_002");
        let service = service(MockGateway {
            fail_evaluation: true,
            ..Default::default()
        });
        let mut session = Session::new(&scenario);

        service.start(&mut session, &scenario).await.unwrap();
        service.choose(&mut session, &scenario, 1).await.unwrap();

        assert_eq!(session.state(), SessionState::Feedback);
        let evaluation = session.evaluation().unwrap();
        assert_eq!(evaluation.score, 50);
        assert!(evaluation.feedback.contains("Wait"));
    }

    #[tokio::test]
    async fn test_choose_substitutes_mock_evaluation_on_out_of_range_result() {
        let scenario = scenario("flood_rescue_002");
        let service = service(MockGateway {
            invalid_evaluation: true,
            ..Default::default()
        });
        let mut session = Session::new(&scenario);

        service.start(&mut session, &scenario).await.unwrap();
        service.choose(&mut session, &scenario, 2).await.unwrap();

        assert_eq!(session.evaluation().unwrap().score, 50);
    }

    #[tokio::test]
    async fn test_video_scenario_attaches_outcome_video() {
        let scenario = scenario("fire_emergency_response_001");
        let service = service(MockGateway::default());
        let mut session = Session::new(&scenario);

        service.start(&mut session, &scenario).await.unwrap();
        service.choose(&mut session, &scenario, 0).await.unwrap();

        assert_eq!(session.state(), SessionState::Feedback);
        assert!(session.outcome_video_url().unwrap().starts_with("data:video/mp4"));
    }

    #[tokio::test]
    async fn test_video_failure_keeps_static_image_and_feedback() {
        let scenario = scenario("fire_emergency_response_001");
        let service = service(MockGateway {
            fail_video: true,
            ..Default::default()
        });
        let mut session = Session::new(&scenario);

        service.start(&mut session, &scenario).await.unwrap();
        service.choose(&mut session, &scenario, 0).await.unwrap();

        assert_eq!(session.state(), SessionState::Feedback);
        assert!(session.outcome_video_url().is_none());
        assert_eq!(
            session.current_media_id(),
            scenario.outcome_media_id_for(0)
        );
    }

    #[tokio::test]
    async fn test_non_video_scenario_never_requests_video() {
        // A failing video gateway must not matter for scenarios without the
        // capability flag.
        let scenario = scenario("hazmat_spill_003");
        assert!(!scenario.outcome_video);
        let service = service(MockGateway {
            fail_video: true,
            ..Default::default()
        });
        let mut session = Session::new(&scenario);

        service.start(&mut session, &scenario).await.unwrap();
        service.choose(&mut session, &scenario, 0).await.unwrap();
        assert!(session.outcome_video_url().is_none());
        assert_eq!(session.state(), SessionState::Feedback);
    }

    #[tokio::test]
    async fn test_choose_rejects_out_of_bounds_index() {
        let scenario = scenario("flood_rescue_002");
        let service = service(MockGateway::default());
        let mut session = Session::new(&scenario);

        service.start(&mut session, &scenario).await.unwrap();
        let err = service.choose(&mut session, &scenario, 9).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(session.state(), SessionState::Deciding);
    }

    #[tokio::test]
    async fn test_reset_allows_a_fresh_run() {
        let scenario = scenario("flood_rescue_002");
        let service = service(MockGateway::default());
        let mut session = Session::new(&scenario);

        service.start(&mut session, &scenario).await.unwrap();
        service.choose(&mut session, &scenario, 0).await.unwrap();
        service.reset(&mut session);

        assert_eq!(session.state(), SessionState::Intro);
        assert_eq!(session.current_media_id(), scenario.initial_media_id);

        service.start(&mut session, &scenario).await.unwrap();
        assert_eq!(session.state(), SessionState::Deciding);
    }
}

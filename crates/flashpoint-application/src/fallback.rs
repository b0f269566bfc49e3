//! Fixed mock data substituted when generation fails.
//!
//! Trading fidelity for availability: a trainee's session must always make
//! forward progress once started, so generation failures are absorbed here
//! instead of surfacing to the trainee.

use flashpoint_core::evaluation::{DecisionEvaluation, PerformanceAnalysis};

/// The three labeled mock choices substituted when choice generation fails.
pub fn mock_decision_choices() -> Vec<String> {
    vec![
        "Mock Decision 1: Evacuate immediately.".to_string(),
        "Mock Decision 2: Wait for more information.".to_string(),
        "Mock Decision 3: Secure the area and assess damage.".to_string(),
    ]
}

/// The deterministic mock evaluation substituted when evaluation fails.
/// References the trainee's literal chosen action so the feedback still
/// reads as a response to what they did.
pub fn mock_evaluation(user_choice: &str) -> DecisionEvaluation {
    DecisionEvaluation {
        score: 50,
        feedback: format!(
            "- This is mock feedback because the AI call failed. \
             \n- Your decision to '{user_choice}' has been noted. \
             \n- In a real scenario, this would have moderate consequences. \
             \n- It's crucial to balance speed and information gathering."
        ),
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
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashpoint_core::evaluation::split_feedback_points;

    #[test]
    fn test_mock_choices_are_exactly_three() {
        assert_eq!(mock_decision_choices().len(), 3);
    }

    #[test]
    fn test_mock_evaluation_references_chosen_action() {
        let evaluation = mock_evaluation("Hold the perimeter");
        assert_eq!(evaluation.score, 50);
        assert!(evaluation.feedback.contains("Hold the perimeter"));
    }

    #[test]
    fn test_mock_evaluation_passes_validation() {
        assert!(mock_evaluation("Wait").validate().is_ok());
    }

    #[test]
    fn test_mock_feedback_splits_into_four_points() {
        let evaluation = mock_evaluation("Wait");
        assert_eq!(split_feedback_points(&evaluation.feedback).len(), 4);
    }
}

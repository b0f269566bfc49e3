//! Scenario domain model.

use serde::{Deserialize, Serialize};

/// A fixed emergency-situation narrative with associated media and scoring
/// metadata. Loaded once and never mutated by a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Unique scenario identifier
    pub id: String,
    /// Human-readable title
    pub title: String,
    /// Narrative description; may contain simple `<br>` markup
    pub description: String,
    /// Optional free-text incident statistics ("• "-bulleted lines)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<String>,
    /// Free text naming the axes the evaluation scores on,
    /// e.g. "Casualty Reduction, Resource Management, Safety Prioritization"
    pub scoring_dimensions: String,
    /// Display media shown while the session is in its initial states
    pub initial_media_id: String,
    /// Outcome display media, indexed by choice position (wrapping)
    pub outcome_media_ids: Vec<String>,
    /// Whether this scenario supports generated outcome video
    #[serde(default)]
    pub outcome_video: bool,
}

impl Scenario {
    /// Static outcome media for the choice at `index`, wrapping modulo the
    /// outcome set. Falls back to the initial media for scenarios that ship
    /// no outcome media at all.
    pub fn outcome_media_id_for(&self, index: usize) -> &str {
        if self.outcome_media_ids.is_empty() {
            return &self.initial_media_id;
        }
        &self.outcome_media_ids[index % self.outcome_media_ids.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_with_outcomes(outcome_media_ids: Vec<String>) -> Scenario {
        Scenario {
            id: "test".to_string(),
            title: "Test".to_string(),
            description: "A test scenario.".to_string(),
            stats: None,
            scoring_dimensions: "Safety".to_string(),
            initial_media_id: "initial".to_string(),
            outcome_media_ids,
            outcome_video: false,
        }
    }

    #[test]
    fn test_outcome_media_wraps_modulo_length() {
        let scenario =
            scenario_with_outcomes(vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(scenario.outcome_media_id_for(1), "b");
        assert_eq!(scenario.outcome_media_id_for(4), "b");
    }

    #[test]
    fn test_outcome_media_falls_back_to_initial_when_empty() {
        let scenario = scenario_with_outcomes(Vec::new());
        assert_eq!(scenario.outcome_media_id_for(2), "initial");
    }
}

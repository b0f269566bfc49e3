//! Built-in scenario fixtures.
//!
//! These records are read-only configuration: a session may re-point its
//! display media into them but never mutates them. Media ids must exist in
//! the registry in `crate::media`.

use super::model::Scenario;

/// Returns the built-in scenario set.
pub fn builtin_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            id: "fire_emergency_response_001".to_string(),
            title: "Warehouse Fire".to_string(),
            description: "A fire has broken out in a chemical storage warehouse on the \
                          industrial estate.<br>Thick black smoke is visible from two \
                          kilometres away and workers are still unaccounted for. You are \
                          the first officer on scene."
                .to_string(),
            stats: Some(
                "• 2 workers unaccounted for<br>• Flammable solvents stored on site<br>\
                 • Wind gusting towards a residential block<br>• Next engine 8 minutes out"
                    .to_string(),
            ),
            scoring_dimensions:
                "Casualty Reduction, Resource Management, Safety Prioritization".to_string(),
            initial_media_id: "scenario-fire-initial".to_string(),
            outcome_media_ids: vec![
                "scenario-fire-outcome-1".to_string(),
                "scenario-fire-outcome-2".to_string(),
                "scenario-fire-outcome-3".to_string(),
            ],
            outcome_video: true,
        },
        Scenario {
            id: "flood_rescue_002".to_string(),
            title: "Flash Flood".to_string(),
            description: "Overnight rain has put a low-lying residential street under a \
                          metre of fast-moving water.<br>Several residents are trapped \
                          upstairs and the level is still rising."
                .to_string(),
            stats: Some(
                "• Water rising roughly 10 cm per hour<br>• 6 households not yet contacted<br>\
                 • One rescue boat available<br>• Power still live in some homes"
                    .to_string(),
            ),
            scoring_dimensions:
                "Casualty Reduction, Triage Ordering, Responder Safety".to_string(),
            initial_media_id: "scenario-flood-initial".to_string(),
            outcome_media_ids: vec![
                "scenario-flood-outcome-1".to_string(),
                "scenario-flood-outcome-2".to_string(),
            ],
            outcome_video: false,
        },
        Scenario {
            id: "hazmat_spill_003".to_string(),
            title: "Tanker Spill".to_string(),
            description: "A road tanker has overturned on the highway shoulder and is \
                          leaking an unidentified liquid.<br>A sharp chemical smell is \
                          reported downwind and traffic is stacking up past the scene."
                .to_string(),
            stats: Some(
                "• Placard partially obscured, contents unconfirmed<br>\
                 • Light wind towards stopped traffic<br>• Driver conscious but trapped"
                    .to_string(),
            ),
            scoring_dimensions:
                "Containment, Public Protection, Information Gathering".to_string(),
            initial_media_id: "scenario-hazmat-initial".to_string(),
            outcome_media_ids: vec![
                "scenario-hazmat-outcome-1".to_string(),
                "scenario-hazmat-outcome-2".to_string(),
            ],
            outcome_video: false,
        },
        Scenario {
            id: "motorway_pileup_004".to_string(),
            title: "Motorway Pileup".to_string(),
            description: "Dense fog has caused a multi-vehicle collision across both \
                          carriageways.<br>Casualty numbers are unknown and vehicles are \
                          still arriving at speed behind the scene."
                .to_string(),
            stats: None,
            scoring_dimensions:
                "Scene Safety, Triage Accuracy, Communication".to_string(),
            initial_media_id: "scenario-pileup-initial".to_string(),
            outcome_media_ids: vec![
                "scenario-pileup-outcome-1".to_string(),
                "scenario-pileup-outcome-2".to_string(),
            ],
            outcome_video: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::find_media;

    #[test]
    fn test_builtin_scenarios_have_unique_ids() {
        let scenarios = builtin_scenarios();
        let mut ids = std::collections::HashSet::new();
        for scenario in &scenarios {
            assert!(
                ids.insert(scenario.id.clone()),
                "scenario ids must be unique, found duplicate: {}",
                scenario.id
            );
        }
    }

    #[test]
    fn test_builtin_scenarios_reference_known_media() {
        for scenario in builtin_scenarios() {
            find_media(&scenario.initial_media_id).unwrap();
            for media_id in &scenario.outcome_media_ids {
                find_media(media_id).unwrap();
            }
        }
    }

    #[test]
    fn test_builtin_scenarios_have_outcome_media() {
        for scenario in builtin_scenarios() {
            assert!(
                !scenario.outcome_media_ids.is_empty(),
                "scenario {} ships no outcome media",
                scenario.id
            );
        }
    }

    #[test]
    fn test_only_the_fire_scenario_enables_outcome_video() {
        let scenarios = builtin_scenarios();
        let video_enabled: Vec<_> = scenarios
            .iter()
            .filter(|scenario| scenario.outcome_video)
            .map(|scenario| scenario.id.as_str())
            .collect();
        assert_eq!(video_enabled, vec!["fire_emergency_response_001"]);
    }
}

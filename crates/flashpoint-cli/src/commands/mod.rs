pub mod images;
pub mod run;
pub mod scenarios;

use anyhow::Result;
use flashpoint_core::scenario::{Scenario, ScenarioRepository, StaticScenarioRepository};

/// Loads a scenario from the built-in set, failing with the known ids.
pub(crate) async fn load_scenario(scenario_id: &str) -> Result<Scenario> {
    let repository = StaticScenarioRepository::builtin();
    if let Some(scenario) = repository.find_by_id(scenario_id).await? {
        return Ok(scenario);
    }
    let known: Vec<String> = repository
        .list_all()
        .await?
        .into_iter()
        .map(|scenario| scenario.id)
        .collect();
    anyhow::bail!(
        "unknown scenario '{scenario_id}', available: {}",
        known.join(", ")
    )
}

/// Replaces simple `<br>` markup with line breaks for terminal output.
pub(crate) fn strip_markup(text: &str) -> String {
    text.replace("<br>", "\n")
}

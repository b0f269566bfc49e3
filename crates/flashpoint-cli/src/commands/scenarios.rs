use anyhow::Result;
use flashpoint_core::scenario::{ScenarioRepository, StaticScenarioRepository};

use super::strip_markup;

/// Prints the built-in scenario catalogue.
pub async fn list() -> Result<()> {
    let repository = StaticScenarioRepository::builtin();
    for scenario in repository.list_all().await? {
        println!("{}  [{}]", scenario.title, scenario.id);
        println!("  {}", strip_markup(&scenario.description).replace('\n', " "));
        println!("  Scored on: {}", scenario.scoring_dimensions);
        if scenario.outcome_video {
            println!("  Supports generated outcome video");
        }
        println!();
    }
    Ok(())
}

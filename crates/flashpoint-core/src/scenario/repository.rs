//! Scenario repository trait and the static in-memory implementation.

use anyhow::Result;
use async_trait::async_trait;

use super::fixtures::builtin_scenarios;
use super::model::Scenario;

/// An abstract read-only source of scenario records.
///
/// This decouples the session logic from where scenarios live (built-in
/// fixtures, a content bundle, a remote catalogue).
#[async_trait]
pub trait ScenarioRepository: Send + Sync {
    /// Finds a scenario by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Scenario))`: Scenario found
    /// - `Ok(None)`: Scenario not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_id(&self, scenario_id: &str) -> Result<Option<Scenario>>;

    /// Lists all available scenarios.
    async fn list_all(&self) -> Result<Vec<Scenario>>;
}

/// A `ScenarioRepository` over a fixed in-memory collection.
pub struct StaticScenarioRepository {
    scenarios: Vec<Scenario>,
}

impl StaticScenarioRepository {
    /// Creates a repository over the given collection.
    pub fn new(scenarios: Vec<Scenario>) -> Self {
        Self { scenarios }
    }

    /// Creates a repository over the built-in fixture set.
    pub fn builtin() -> Self {
        Self::new(builtin_scenarios())
    }
}

#[async_trait]
impl ScenarioRepository for StaticScenarioRepository {
    async fn find_by_id(&self, scenario_id: &str) -> Result<Option<Scenario>> {
        Ok(self
            .scenarios
            .iter()
            .find(|scenario| scenario.id == scenario_id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Scenario>> {
        Ok(self.scenarios.clone())
    }
}

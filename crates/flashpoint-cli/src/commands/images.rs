use std::sync::Arc;

use anyhow::Result;
use flashpoint_core::gateway::GenerationGateway;
use flashpoint_gateway::{GatewayConfig, GeminiGateway};

use super::load_scenario;

/// Generates a visual-narrative image set for a scenario and prints the
/// resulting prompts and payload sizes.
pub async fn generate(scenario_id: &str, count: usize) -> Result<()> {
    let scenario = load_scenario(scenario_id).await?;
    let gateway = Arc::new(GeminiGateway::new(GatewayConfig::from_env()?));

    println!("Generating {count} image(s) for '{}'...", scenario.title);
    let images = gateway
        .generate_scenario_images(&scenario.description, count)
        .await?;

    for (index, image) in images.iter().enumerate() {
        println!("{}. {}", index + 1, image.prompt);
        println!("   data URI, {} bytes", image.url.len());
    }
    println!("{} image(s) generated.", images.len());
    Ok(())
}

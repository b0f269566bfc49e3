use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "flashpoint")]
#[command(about = "Flashpoint - AI-driven emergency response training simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available training scenarios
    Scenarios,
    /// Run an interactive training session
    Run {
        /// Scenario identifier (see `flashpoint scenarios`)
        scenario_id: String,
    },
    /// Generate a visual-narrative image set for a scenario
    Images {
        /// Scenario identifier (see `flashpoint scenarios`)
        scenario_id: String,
        /// Number of images to generate (1-7)
        #[arg(long, default_value_t = 3)]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scenarios => commands::scenarios::list().await,
        Commands::Run { scenario_id } => commands::run::run(&scenario_id).await,
        Commands::Images { scenario_id, count } => {
            commands::images::generate(&scenario_id, count).await
        }
    }
}

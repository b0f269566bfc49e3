use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Result;

use flashpoint_application::TrainingService;
use flashpoint_core::evaluation::split_feedback_points;
use flashpoint_core::media::find_media;
use flashpoint_core::scenario::Scenario;
use flashpoint_core::session::Session;
use flashpoint_gateway::{GatewayConfig, GeminiGateway};

use super::{load_scenario, strip_markup};

/// Runs a full interactive session for one scenario.
pub async fn run(scenario_id: &str) -> Result<()> {
    let scenario = load_scenario(scenario_id).await?;
    let gateway = Arc::new(GeminiGateway::new(GatewayConfig::from_env()?));
    let service = TrainingService::new(gateway);
    let mut session = Session::new(&scenario);

    loop {
        print_intro(&scenario, &session);
        prompt_line("Press Enter to begin the simulation...")?;

        println!("Requesting decision choices...");
        service.start(&mut session, &scenario).await?;

        println!();
        println!("What's your next move?");
        for (index, choice) in session.choices().iter().enumerate() {
            println!("  {}. {}", index + 1, choice);
        }
        let index = read_choice_index(session.choices().len())?;

        if scenario.outcome_video {
            println!("Generating consequence video, this may take a minute...");
        } else {
            println!("Evaluating consequences...");
        }
        service.choose(&mut session, &scenario, index).await?;

        print_feedback(&session)?;

        let again = prompt_line("Run the simulation again? [y/N] ")?;
        if again.trim().eq_ignore_ascii_case("y") {
            service.reset(&mut session);
        } else {
            return Ok(());
        }
    }
}

fn print_intro(scenario: &Scenario, session: &Session) {
    println!("=== {} ===", scenario.title);
    if let Ok(asset) = find_media(session.current_media_id()) {
        println!("[{}]", asset.description);
    }
    println!("{}", strip_markup(&scenario.description));
    if let Some(stats) = &scenario.stats {
        println!();
        println!("Incident Dangers:");
        println!("{}", strip_markup(stats));
    }
    println!();
}

fn print_feedback(session: &Session) -> Result<()> {
    let Some(evaluation) = session.evaluation() else {
        anyhow::bail!("session finished without an evaluation");
    };

    println!();
    println!("=== Performance Review ===");
    println!("Score: {}/100", evaluation.score);
    if let Some(response_time) = session.response_time_seconds() {
        println!("Response time: {response_time:.1}s");
    }
    if let Some(accuracy) = evaluation.decision_accuracy {
        println!("Decision accuracy: {accuracy}%");
    }
    if let Some(confidence) = evaluation.confidence_level {
        println!("Confidence level: {confidence}%");
    }
    if let Some(analysis) = &evaluation.performance_analysis {
        println!();
        println!("Performance breakdown:");
        for (label, value) in analysis.axes() {
            println!("  {label:<20} {value:>3}%");
        }
    }

    println!();
    println!("AI Feedback:");
    for point in split_feedback_points(&evaluation.feedback) {
        println!("  * {point}");
    }

    if let Some(video_url) = session.outcome_video_url() {
        println!();
        println!("Outcome video ready ({} bytes, data URI)", video_url.len());
    } else if let Ok(asset) = find_media(session.current_media_id()) {
        println!();
        println!("[Outcome: {}]", asset.description);
    }
    println!();
    Ok(())
}

fn read_choice_index(choice_count: usize) -> Result<usize> {
    loop {
        let line = prompt_line(&format!("Your choice [1-{choice_count}]: "))?;
        match line.trim().parse::<usize>() {
            Ok(number) if (1..=choice_count).contains(&number) => return Ok(number - 1),
            _ => println!("Please enter a number between 1 and {choice_count}."),
        }
    }
}

fn prompt_line(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

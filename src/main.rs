use std::process::ExitCode;
use std::sync::Arc;
use weekplan::application::event_input::parse_user_events;
use weekplan::application::generation::GenerationController;
use weekplan::application::merger::merge_events;
use weekplan::domain::models::WeeklyEvents;
use weekplan::infrastructure::config::{ensure_default_config, load_config};
use weekplan::infrastructure::error::InfraError;
use weekplan::infrastructure::text_generator::HttpTextGenerator;

const SAMPLE_EVENTS: &str = "Monday 08:00-10:00 Gym\n\
                             Monday 10:00-18:00 Work\n\
                             Monday 18:00-20:00 Leisure\n\
                             Tuesday 08:00-10:00 Gym\n\
                             Tuesday 10:00-13:00 Project Trip\n\
                             Tuesday 13:00-21:00 Work\n";

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    match run().await {
        Ok(valid) => {
            if !valid {
                log::warn!("schedule generated with violations, not fit for calendar sync");
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("weekplan: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<bool, InfraError> {
    let config_dir = std::env::current_dir()?;
    ensure_default_config(&config_dir)?;
    let config = load_config(&config_dir)?;

    let events_text = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            log::info!("no events file given, using built-in sample events");
            SAMPLE_EVENTS.to_string()
        }
    };

    let user_events = parse_user_events(&events_text);
    // No calendar credentials in CLI mode; the observed set stays empty.
    let merged = merge_events(&user_events, &WeeklyEvents::new());

    let generator = Arc::new(HttpTextGenerator::new(
        &config.generator.base_url,
        &config.generator.model,
    )?);
    let controller = GenerationController::new(generator, config.min_sleep_hours);

    let outcome = controller.plan_week(&merged).await?;
    if outcome.retried {
        log::info!("first attempt came back empty; result is from the retry");
    }

    println!("{}", outcome.schedule.render());
    println!(
        "{}",
        serde_json::to_string_pretty(&outcome.report)?
    );
    Ok(outcome.report.is_valid())
}

use crate::domain::models::{Day, WeeklyEvents};
use std::fmt::Write;

/// Appended to the prompt for the single retry after a structurally empty
/// first pass.
pub const RETRY_REMINDER: &str = "\nREMINDER: Output ONLY the schedule, no explanations.\n";

/// Builds the constrained prompt handed to the generative text source. The
/// instructions pin the exact seven-day output shape so the extractor has
/// something to hold the response against.
pub fn build_prompt(events: &WeeklyEvents, min_sleep_hours: f64) -> String {
    let mut event_block = String::new();
    for day in Day::ALL {
        let tasks = events.day(day);
        if tasks.is_empty() {
            let _ = writeln!(event_block, "{}: (none)", day.name());
        } else {
            let rendered: Vec<String> = tasks
                .iter()
                .map(|event| format!("{} ({:.1} hrs)", event.label, event.hours))
                .collect();
            let _ = writeln!(event_block, "{}: {}", day.name(), rendered.join(", "));
        }
    }

    let mut format_block = String::new();
    for day in Day::ALL {
        let _ = writeln!(format_block, "{}:", day.name());
        let _ = writeln!(format_block, "    HH:MM-HH:MM-Activity");
    }

    format!(
        "You are an AI scheduling engine.\n\
         \n\
         Your task is to generate a 7-day weekly schedule using the EXACT format below.\n\
         \n\
         REQUIREMENTS:\n\
         - Output MUST contain all 7 days in this exact order:\n\
         \x20 Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday.\n\
         - Every day must include at least {min_sleep_hours:.0} hours of Sleep.\n\
         - Sleep must ALWAYS be the final block of each day.\n\
         - Sleep may cross midnight (e.g., 21:00-05:00-Sleep is allowed).\n\
         - If sleep crosses midnight, record it under the day where the sleep begins.\n\
         - Activities must remain on their correct day.\n\
         - A day should be close to 24 total hours (it is okay if slightly under or over).\n\
         - NO explanations. NO examples. NO commentary.\n\
         \n\
         OUTPUT FORMAT (USE THIS EXACTLY):\n\
         \n\
         {format_block}\n\
         EVENT INPUT:\n\
         {event_block}\n\
         Now output ONLY the weekly schedule in the exact format above.\n"
    )
}

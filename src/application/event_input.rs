use crate::domain::models::{parse_hhmm, Day, PlannedEvent, WeeklyEvents, MINUTES_PER_DAY};
use chrono::{NaiveTime, Timelike};

const DEFAULT_LABEL: &str = "Task";

/// Parses freeform user event lines of the shape `Day HH:MM-HH:MM Activity`
/// into the per-day `(label, hours)` set. Accepts day aliases (`mon`,
/// `tues`, ...), bare hours (`9-11`), and midnight-crossing ranges; lines
/// that do not fit are skipped, never reported.
pub fn parse_user_events(text: &str) -> WeeklyEvents {
    let mut events = WeeklyEvents::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let Some((day, event)) = parse_event_line(trimmed) else {
            log::debug!("skipping unparsable event line: {trimmed:?}");
            continue;
        };
        events.add(day, event);
    }
    events
}

fn parse_event_line(line: &str) -> Option<(Day, PlannedEvent)> {
    let (day_token, rest) = line.split_once(char::is_whitespace)?;
    let day = day_from_alias(day_token)?;

    let rest = rest.trim();
    let (range_token, label) = match rest.split_once(char::is_whitespace) {
        Some((range, label)) => (range, label.trim()),
        None => (rest, ""),
    };

    let (start_raw, end_raw) = range_token.split_once('-')?;
    let start = parse_loose_time(start_raw)?;
    let end = parse_loose_time(end_raw)?;

    let start_minutes = i64::from(start.num_seconds_from_midnight()) / 60;
    let end_minutes = i64::from(end.num_seconds_from_midnight()) / 60;
    let duration = if end_minutes <= start_minutes {
        end_minutes + MINUTES_PER_DAY - start_minutes
    } else {
        end_minutes - start_minutes
    };

    let label = if label.is_empty() { DEFAULT_LABEL } else { label };
    Some((
        day,
        PlannedEvent::new(label, duration as f64 / 60.0),
    ))
}

/// `8`, `8:30`, or `08:30`; a bare hour means on-the-hour.
fn parse_loose_time(value: &str) -> Option<NaiveTime> {
    let trimmed = value.trim();
    if trimmed.contains(':') {
        return parse_hhmm(trimmed);
    }
    if trimmed.is_empty() || trimmed.len() > 2 || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let hour = trimmed.parse::<u32>().ok()?;
    NaiveTime::from_hms_opt(hour, 0, 0)
}

fn day_from_alias(token: &str) -> Option<Day> {
    match token.to_lowercase().as_str() {
        "mon" | "monday" => Some(Day::Monday),
        "tue" | "tues" | "tuesday" => Some(Day::Tuesday),
        "wed" | "weds" | "wednesday" => Some(Day::Wednesday),
        "thu" | "thur" | "thurs" | "thursday" => Some(Day::Thursday),
        "fri" | "friday" => Some(Day::Friday),
        "sat" | "saturday" => Some(Day::Saturday),
        "sun" | "sunday" => Some(Day::Sunday),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_form_lines() {
        let events = parse_user_events("Monday 08:00-10:00 Gym\nMonday 10:00-18:00 Work\n");
        let monday = events.day(Day::Monday);
        assert_eq!(monday.len(), 2);
        assert_eq!(monday[0].label, "Gym");
        assert_eq!(monday[0].hours, 2.0);
        assert_eq!(monday[1].label, "Work");
        assert_eq!(monday[1].hours, 8.0);
    }

    #[test]
    fn accepts_day_aliases_and_bare_hours() {
        let events = parse_user_events("Tue 9-11 Work\nweds 8:30-10 Standup prep\n");
        assert_eq!(events.day(Day::Tuesday)[0].hours, 2.0);
        let wednesday = events.day(Day::Wednesday);
        assert_eq!(wednesday[0].label, "Standup prep");
        assert_eq!(wednesday[0].hours, 1.5);
    }

    #[test]
    fn midnight_crossing_range_gets_a_positive_duration() {
        let events = parse_user_events("Fri 21-5 Sleep\n");
        assert_eq!(events.day(Day::Friday)[0].hours, 8.0);
    }

    #[test]
    fn missing_label_defaults_to_task() {
        let events = parse_user_events("Sat 10:00-12:00\n");
        assert_eq!(events.day(Day::Saturday)[0].label, "Task");
    }

    #[test]
    fn unparsable_lines_are_skipped() {
        let events = parse_user_events(
            "Someday 08:00-10:00 Gym\n\
             Monday no-times-here\n\
             Monday\n\
             \n\
             Monday 26-28 Gym\n",
        );
        assert!(events.is_empty());
    }

    #[test]
    fn multi_word_labels_are_preserved() {
        let events = parse_user_events("Tuesday 10:00-13:00 Project Trip\n");
        assert_eq!(events.day(Day::Tuesday)[0].label, "Project Trip");
    }
}

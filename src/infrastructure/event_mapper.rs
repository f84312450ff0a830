use crate::domain::models::{Day, PlannedEvent, WeeklyEvents};
use crate::infrastructure::calendar_client::CalendarEvent;
use chrono::{DateTime, Datelike, Utc};

/// Folds raw calendar events into the observed weekly event set: each
/// event becomes a `(day, label, hours)` entry keyed by the weekday its
/// start falls on. Cancelled events and events with unreadable or
/// reversed timestamps are skipped; observation never fails.
pub fn observed_events(events: &[CalendarEvent]) -> WeeklyEvents {
    let mut observed = WeeklyEvents::new();

    for event in events {
        let is_cancelled = event
            .status
            .as_deref()
            .map(|status| status.eq_ignore_ascii_case("cancelled"))
            .unwrap_or(false);
        if is_cancelled {
            continue;
        }

        let Some(start) = parse_rfc3339_utc(&event.start.date_time) else {
            log::debug!("skipping calendar event with unreadable start timestamp");
            continue;
        };
        let Some(end) = parse_rfc3339_utc(&event.end.date_time) else {
            log::debug!("skipping calendar event with unreadable end timestamp");
            continue;
        };
        if end <= start {
            continue;
        }

        let label = event
            .summary
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or("Busy");
        let hours = (end - start).num_minutes() as f64 / 60.0;
        let day = Day::from_weekday(start.weekday());
        observed.add(day, PlannedEvent::new(label, hours));
    }
    observed
}

fn parse_rfc3339_utc(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|value| value.with_timezone(&Utc))
        .ok()
}

use crate::domain::models::{Day, WeeklyEvents};

/// Unions the user-declared weekly events with the calendar-observed ones
/// into a single per-day task list: user events first, observed events
/// appended after, order preserved. Nothing is de-duplicated: two
/// identically named tasks on the same day stay two entries, since each
/// `(day, label)` pair keeps its identity for the task-preservation check.
pub fn merge_events(user: &WeeklyEvents, observed: &WeeklyEvents) -> WeeklyEvents {
    let mut merged = WeeklyEvents::new();
    for day in Day::ALL {
        let mut events = user.day(day).to_vec();
        events.extend(observed.day(day).iter().cloned());
        if !events.is_empty() {
            merged.set_day(day, events);
        }
    }
    merged
}

use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MINUTES_PER_DAY: i64 = 24 * 60;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }

    pub fn from_name(value: &str) -> Option<Day> {
        Day::ALL.into_iter().find(|day| day.name() == value)
    }

    /// Parses a day header line of the exact form `"<DayName>:"`.
    pub fn from_header(line: &str) -> Option<Day> {
        let name = line.strip_suffix(':')?;
        Day::from_name(name)
    }

    pub fn from_weekday(weekday: Weekday) -> Day {
        match weekday {
            Weekday::Mon => Day::Monday,
            Weekday::Tue => Day::Tuesday,
            Weekday::Wed => Day::Wednesday,
            Weekday::Thu => Day::Thursday,
            Weekday::Fri => Day::Friday,
            Weekday::Sat => Day::Saturday,
            Weekday::Sun => Day::Sunday,
        }
    }

    /// Days after Monday, used to date a schedule against a week start.
    pub fn offset_from_monday(self) -> i64 {
        Day::ALL
            .into_iter()
            .position(|day| day == self)
            .unwrap_or(0) as i64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub label: String,
}

impl TimeBlock {
    pub fn new(start: NaiveTime, end: NaiveTime, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    /// Attempts to read one `HH:MM-HH:MM-Label` line. Hours may be one or
    /// two digits; minutes must be two. Returns `None` for any line that
    /// does not match, so callers can discard unrecognized lines instead
    /// of reporting errors.
    pub fn parse_line(line: &str) -> Option<TimeBlock> {
        let trimmed = line.trim();
        let (start_raw, rest) = trimmed.split_once('-')?;
        let (end_raw, label) = rest.split_once('-')?;
        let start = parse_hhmm(start_raw)?;
        let end = parse_hhmm(end_raw)?;
        Some(TimeBlock {
            start,
            end,
            label: label.trim().to_string(),
        })
    }

    /// Interval length in minutes, counting `end < start` as crossing
    /// midnight. Equal endpoints are an empty interval. Always within
    /// `0..1440`.
    pub fn duration_minutes(&self) -> i64 {
        let start = i64::from(self.start.num_seconds_from_midnight()) / 60;
        let end = i64::from(self.end.num_seconds_from_midnight()) / 60;
        if end < start {
            end + MINUTES_PER_DAY - start
        } else {
            end - start
        }
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration_minutes() as f64 / 60.0
    }

    pub fn is_sleep(&self) -> bool {
        self.label.to_lowercase().contains("sleep")
    }

    pub fn render(&self) -> String {
        format!(
            "{}-{}-{}",
            format_hhmm(self.start),
            format_hhmm(self.end),
            self.label
        )
    }
}

/// A planned activity before it is placed on the clock: just a label and a
/// duration. Both user-declared and calendar-observed events are folded
/// into this shape before prompt construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedEvent {
    pub label: String,
    pub hours: f64,
}

impl PlannedEvent {
    pub fn new(label: impl Into<String>, hours: f64) -> Self {
        Self {
            label: label.into(),
            hours,
        }
    }
}

/// Per-day planned events, ordered Monday through Sunday.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyEvents {
    days: BTreeMap<Day, Vec<PlannedEvent>>,
}

impl WeeklyEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, day: Day, event: PlannedEvent) {
        self.days.entry(day).or_default().push(event);
    }

    pub fn set_day(&mut self, day: Day, events: Vec<PlannedEvent>) {
        self.days.insert(day, events);
    }

    pub fn day(&self, day: Day) -> &[PlannedEvent] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Day, &[PlannedEvent])> {
        self.days
            .iter()
            .map(|(day, events)| (*day, events.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.days.values().all(Vec::is_empty)
    }
}

/// A full week of time blocks. Created fresh per generation cycle, mutated
/// in place by reconciliation, and treated as immutable once validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    days: BTreeMap<Day, Vec<TimeBlock>>,
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// A schedule with all seven day keys present and empty.
    pub fn with_all_days() -> Self {
        let mut schedule = Self::default();
        for day in Day::ALL {
            schedule.days.insert(day, Vec::new());
        }
        schedule
    }

    pub fn set_day(&mut self, day: Day, blocks: Vec<TimeBlock>) {
        self.days.insert(day, blocks);
    }

    pub fn push_block(&mut self, day: Day, block: TimeBlock) {
        self.days.entry(day).or_default().push(block);
    }

    pub fn contains_day(&self, day: Day) -> bool {
        self.days.contains_key(&day)
    }

    pub fn day(&self, day: Day) -> &[TimeBlock] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn day_mut(&mut self, day: Day) -> &mut Vec<TimeBlock> {
        self.days.entry(day).or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Day, &[TimeBlock])> {
        self.days
            .iter()
            .map(|(day, blocks)| (*day, blocks.as_slice()))
    }

    /// True when no day carries a single block; the generation retry
    /// trigger.
    pub fn is_empty_of_blocks(&self) -> bool {
        self.days.values().all(Vec::is_empty)
    }

    /// Renders the schedule in the exchange text format: each day as
    /// `"<DayName>:"` followed by four-space-indented `HH:MM-HH:MM-Label`
    /// lines, Monday through Sunday. Downstream display and sync code
    /// parses this output, so the shape is fixed.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for day in Day::ALL {
            out.push_str(day.name());
            out.push_str(":\n");
            for block in self.day(day) {
                out.push_str("    ");
                out.push_str(&block.render());
                out.push('\n');
            }
        }
        out
    }
}

/// Minutes a sleep block contributes to its day. An equal-endpoint sleep
/// block is the shared rendering for a full-day sleep and a clamped zero
/// allocation, so the day's non-sleep total tells the two apart.
pub fn sleep_block_minutes(block: &TimeBlock, non_sleep_minutes: i64) -> i64 {
    if block.start == block.end {
        (MINUTES_PER_DAY - non_sleep_minutes).clamp(0, MINUTES_PER_DAY)
    } else {
        block.duration_minutes()
    }
}

pub fn format_hhmm(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Reads a 24-hour `H:MM`/`HH:MM` clock time; digits only.
pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    let trimmed = value.trim();
    let (hour_str, minute_str) = trimmed.split_once(':')?;
    if hour_str.is_empty() || hour_str.len() > 2 || minute_str.len() != 2 {
        return None;
    }
    if !hour_str.chars().all(|c| c.is_ascii_digit())
        || !minute_str.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }
    let hour = hour_str.parse::<u32>().ok()?;
    let minute = minute_str.parse::<u32>().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
    }

    #[test]
    fn parse_line_reads_simple_block() {
        let block = TimeBlock::parse_line("08:00-10:00-Gym").expect("block parses");
        assert_eq!(block.start, time(8, 0));
        assert_eq!(block.end, time(10, 0));
        assert_eq!(block.label, "Gym");
        assert_eq!(block.duration_hours(), 2.0);
    }

    #[test]
    fn parse_line_accepts_single_digit_hours_and_indentation() {
        let block = TimeBlock::parse_line("    8:30-9:15-Reading").expect("block parses");
        assert_eq!(block.start, time(8, 30));
        assert_eq!(block.end, time(9, 15));
        assert_eq!(block.render(), "08:30-09:15-Reading");
    }

    #[test]
    fn parse_line_keeps_hyphens_inside_label() {
        let block = TimeBlock::parse_line("09:00-10:00-Check-in call").expect("block parses");
        assert_eq!(block.label, "Check-in call");
    }

    #[test]
    fn parse_line_accepts_empty_label() {
        let block = TimeBlock::parse_line("09:00-10:00-  ").expect("block parses");
        assert_eq!(block.label, "");
    }

    #[test]
    fn parse_line_rejects_noise() {
        for line in [
            "",
            "Monday:",
            "Here is your schedule:",
            "- Gym (2 hrs)",
            "8:0-10:00-Gym",
            "25:00-26:00-Gym",
            "08:60-10:00-Gym",
            "08:00-10:00",
            "```",
        ] {
            assert!(
                TimeBlock::parse_line(line).is_none(),
                "line should not parse: {line:?}"
            );
        }
    }

    #[test]
    fn duration_handles_midnight_rollover() {
        let block = TimeBlock::parse_line("21:00-05:00-Sleep").expect("block parses");
        assert_eq!(block.duration_hours(), 8.0);
    }

    #[test]
    fn identical_endpoints_are_an_empty_interval() {
        let block = TimeBlock::new(time(21, 0), time(21, 0), "Sleep");
        assert_eq!(block.duration_minutes(), 0);
    }

    #[test]
    fn equal_endpoint_sleep_reads_from_day_context() {
        let degenerate = TimeBlock::new(time(21, 0), time(21, 0), "Sleep");
        // On an otherwise empty day this is a full night and day of sleep;
        // on an overfull day it is a clamped zero allocation.
        assert_eq!(sleep_block_minutes(&degenerate, 0), MINUTES_PER_DAY);
        assert_eq!(sleep_block_minutes(&degenerate, 30 * 60), 0);

        let plain = TimeBlock::new(time(22, 0), time(6, 0), "Sleep");
        assert_eq!(sleep_block_minutes(&plain, 16 * 60), 480);
    }

    #[test]
    fn sleep_marker_matches_case_insensitive_substring() {
        assert!(TimeBlock::new(time(22, 0), time(6, 0), "Deep SLEEP").is_sleep());
        assert!(TimeBlock::new(time(22, 0), time(6, 0), "sleeping in").is_sleep());
        assert!(!TimeBlock::new(time(9, 0), time(17, 0), "Work").is_sleep());
    }

    #[test]
    fn day_header_parsing_is_exact() {
        assert_eq!(Day::from_header("Monday:"), Some(Day::Monday));
        assert_eq!(Day::from_header("Sunday:"), Some(Day::Sunday));
        assert_eq!(Day::from_header("Monday"), None);
        assert_eq!(Day::from_header("monday:"), None);
        assert_eq!(Day::from_header("Someday:"), None);
    }

    #[test]
    fn days_are_ordered_monday_through_sunday() {
        let mut sorted = Day::ALL;
        sorted.sort();
        assert_eq!(sorted, Day::ALL);
        assert_eq!(Day::Sunday.offset_from_monday(), 6);
    }

    #[test]
    fn render_lists_all_days_in_order_with_indented_blocks() {
        let mut schedule = WeeklySchedule::with_all_days();
        schedule.push_block(Day::Monday, TimeBlock::new(time(8, 0), time(10, 0), "Gym"));
        let rendered = schedule.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Monday:");
        assert_eq!(lines[1], "    08:00-10:00-Gym");
        assert_eq!(lines[2], "Tuesday:");
        assert_eq!(lines.last(), Some(&"Sunday:"));
    }

    #[test]
    fn weekly_schedule_serde_roundtrip() {
        let mut schedule = WeeklySchedule::with_all_days();
        schedule.push_block(Day::Friday, TimeBlock::new(time(21, 0), time(5, 0), "Sleep"));
        let roundtrip: WeeklySchedule =
            serde_json::from_str(&serde_json::to_string(&schedule).expect("serialize schedule"))
                .expect("deserialize schedule");
        assert_eq!(roundtrip, schedule);
    }

    proptest! {
        #[test]
        fn duration_stays_within_a_day(
            start_hour in 0u32..24,
            start_minute in 0u32..60,
            end_hour in 0u32..24,
            end_minute in 0u32..60,
        ) {
            let block = TimeBlock::new(
                time(start_hour, start_minute),
                time(end_hour, end_minute),
                "Task",
            );
            prop_assert!(block.duration_minutes() >= 0);
            prop_assert!(block.duration_minutes() < MINUTES_PER_DAY);
        }

        #[test]
        fn rendered_block_reparses_to_itself(
            start_hour in 0u32..24,
            start_minute in 0u32..60,
            end_hour in 0u32..24,
            end_minute in 0u32..60,
            label in "[A-Za-z][A-Za-z ]{0,20}",
        ) {
            let block = TimeBlock::new(
                time(start_hour, start_minute),
                time(end_hour, end_minute),
                label.trim(),
            );
            let reparsed = TimeBlock::parse_line(&block.render()).expect("rendered block parses");
            prop_assert_eq!(reparsed, block);
        }
    }
}

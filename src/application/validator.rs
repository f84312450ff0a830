use crate::domain::models::{
    sleep_block_minutes, Day, TimeBlock, WeeklyEvents, WeeklySchedule, MINUTES_PER_DAY,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepViolation {
    pub day: Day,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalHoursViolation {
    pub day: Day,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingTask {
    pub day: Day,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCompleteness {
    pub ok: bool,
    pub missing_days: Vec<Day>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepRequirement {
    pub ok: bool,
    pub violations: Vec<SleepViolation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Max24Hours {
    pub ok: bool,
    pub violations: Vec<TotalHoursViolation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskPreservation {
    pub ok: bool,
    pub missing_tasks: Vec<MissingTask>,
}

/// Aggregated outcome of the four schedule checks. Violations are
/// reported, never thrown; callers decide whether a failed report blocks
/// calendar sync.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub day_completeness: DayCompleteness,
    pub sleep_requirement: SleepRequirement,
    pub max_24_hours: Max24Hours,
    pub task_preservation: TaskPreservation,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.day_completeness.ok
            && self.sleep_requirement.ok
            && self.max_24_hours.ok
            && self.task_preservation.ok
    }
}

/// Runs a fixed battery of checks against a reconciled schedule and the
/// merged reference event set. The checks are independent; none
/// short-circuits the others.
#[derive(Debug, Clone)]
pub struct ScheduleValidator {
    min_sleep_hours: f64,
}

impl ScheduleValidator {
    pub fn new(min_sleep_hours: f64) -> Self {
        Self { min_sleep_hours }
    }

    pub fn validate(
        &self,
        schedule: &WeeklySchedule,
        reference_events: &WeeklyEvents,
    ) -> ValidationReport {
        ValidationReport {
            day_completeness: self.check_completeness(schedule),
            sleep_requirement: self.check_sleep(schedule),
            max_24_hours: self.check_total_hours(schedule),
            task_preservation: self.check_task_preservation(schedule, reference_events),
        }
    }

    fn check_completeness(&self, schedule: &WeeklySchedule) -> DayCompleteness {
        let missing_days: Vec<Day> = Day::ALL
            .into_iter()
            .filter(|day| !schedule.contains_day(*day))
            .collect();
        DayCompleteness {
            ok: missing_days.is_empty(),
            missing_days,
        }
    }

    fn check_sleep(&self, schedule: &WeeklySchedule) -> SleepRequirement {
        let mut violations = Vec::new();
        for (day, blocks) in schedule.iter() {
            let non_sleep = non_sleep_minutes(blocks);
            for block in blocks.iter().filter(|block| block.is_sleep()) {
                let hours = sleep_block_minutes(block, non_sleep) as f64 / 60.0;
                if hours < self.min_sleep_hours {
                    violations.push(SleepViolation { day, hours });
                }
            }
        }
        SleepRequirement {
            ok: violations.is_empty(),
            violations,
        }
    }

    fn check_total_hours(&self, schedule: &WeeklySchedule) -> Max24Hours {
        let mut violations = Vec::new();
        for (day, blocks) in schedule.iter() {
            let non_sleep = non_sleep_minutes(blocks);
            let sleep: i64 = blocks
                .iter()
                .filter(|block| block.is_sleep())
                .map(|block| sleep_block_minutes(block, non_sleep))
                .sum();
            let total = non_sleep + sleep;
            if total > MINUTES_PER_DAY {
                violations.push(TotalHoursViolation {
                    day,
                    hours: total as f64 / 60.0,
                });
            }
        }
        Max24Hours {
            ok: violations.is_empty(),
            violations,
        }
    }

    /// A reference task counts as preserved when any block label on its day
    /// contains the task label as a case-sensitive substring, so "Work" is
    /// satisfied by "Work Shift".
    fn check_task_preservation(
        &self,
        schedule: &WeeklySchedule,
        reference_events: &WeeklyEvents,
    ) -> TaskPreservation {
        let mut missing_tasks = Vec::new();
        for (day, events) in reference_events.iter() {
            for event in events {
                let found = schedule
                    .day(day)
                    .iter()
                    .any(|block| block.label.contains(&event.label));
                if !found {
                    missing_tasks.push(MissingTask {
                        day,
                        label: event.label.clone(),
                    });
                }
            }
        }
        TaskPreservation {
            ok: missing_tasks.is_empty(),
            missing_tasks,
        }
    }
}

fn non_sleep_minutes(blocks: &[TimeBlock]) -> i64 {
    blocks
        .iter()
        .filter(|block| !block.is_sleep())
        .map(TimeBlock::duration_minutes)
        .sum()
}

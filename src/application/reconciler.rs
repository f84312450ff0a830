use crate::domain::models::{sleep_block_minutes, Day, TimeBlock, WeeklySchedule, MINUTES_PER_DAY};
use chrono::NaiveTime;

const DEFAULT_SLEEP_LABEL: &str = "Sleep";

/// Start used for a synthesized sleep block when a day has no other block
/// to anchor it.
fn canonical_sleep_start() -> NaiveTime {
    NaiveTime::from_hms_opt(21, 0, 0).expect("21:00 is a valid time")
}

/// Repairs every day so it ends in exactly one sleep block and totals 24
/// hours. Non-sleep blocks keep their clock times untouched; only the
/// sleep block is replaced. Structural defects (no sleep block, several
/// sleep blocks, an under- or overfull day) are repaired silently; an
/// overfull day loses its sleep allocation entirely, which the validator
/// reports separately.
#[derive(Debug, Clone)]
pub struct SleepReconciler {
    min_sleep_hours: f64,
}

impl SleepReconciler {
    pub fn new(min_sleep_hours: f64) -> Self {
        Self { min_sleep_hours }
    }

    pub fn min_sleep_hours(&self) -> f64 {
        self.min_sleep_hours
    }

    pub fn reconcile(&self, schedule: &mut WeeklySchedule) {
        for day in Day::ALL {
            let blocks = std::mem::take(schedule.day_mut(day));
            let repaired = self.reconcile_day(blocks);
            if let Some((sleep, rest)) = repaired.split_last() {
                let non_sleep: i64 = rest.iter().map(TimeBlock::duration_minutes).sum();
                let hours = sleep_block_minutes(sleep, non_sleep) as f64 / 60.0;
                if hours < self.min_sleep_hours {
                    log::warn!(
                        "{}: sleep reduced to {:.1}h to fit non-sleep blocks",
                        day.name(),
                        hours
                    );
                }
            }
            schedule.set_day(day, repaired);
        }
    }

    /// Rebuilds one day: non-sleep blocks in their original order, then a
    /// single sleep block sized to bring the total to exactly 24 hours
    /// (clamped at zero when the day is already overfull).
    pub fn reconcile_day(&self, blocks: Vec<TimeBlock>) -> Vec<TimeBlock> {
        let mut non_sleep: Vec<TimeBlock> = Vec::new();
        let mut sleep_label: Option<String> = None;
        for block in blocks {
            if block.is_sleep() {
                // Several sleep blocks collapse into one; the first keeps
                // naming rights.
                if sleep_label.is_none() {
                    sleep_label = Some(block.label);
                }
            } else {
                non_sleep.push(block);
            }
        }

        let non_sleep_total: i64 = non_sleep.iter().map(TimeBlock::duration_minutes).sum();
        let sleep_minutes = (MINUTES_PER_DAY - non_sleep_total).max(0);

        let sleep_start = non_sleep
            .last()
            .map(|block| block.end)
            .unwrap_or_else(canonical_sleep_start);
        let sleep_end = add_minutes(sleep_start, sleep_minutes);

        let mut repaired = non_sleep;
        repaired.push(TimeBlock::new(
            sleep_start,
            sleep_end,
            sleep_label.unwrap_or_else(|| DEFAULT_SLEEP_LABEL.to_string()),
        ));
        repaired
    }
}

fn add_minutes(start: NaiveTime, minutes: i64) -> NaiveTime {
    start + chrono::Duration::minutes(minutes % MINUTES_PER_DAY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
    }

    fn block(start: (u32, u32), end: (u32, u32), label: &str) -> TimeBlock {
        TimeBlock::new(time(start.0, start.1), time(end.0, end.1), label)
    }

    fn reconciler() -> SleepReconciler {
        SleepReconciler::new(8.0)
    }

    #[test]
    fn empty_day_gets_a_full_day_sleep_block_at_canonical_start() {
        let repaired = reconciler().reconcile_day(Vec::new());
        assert_eq!(repaired.len(), 1);
        assert_eq!(repaired[0].label, "Sleep");
        assert_eq!(repaired[0].start, time(21, 0));
        assert_eq!(repaired[0].end, time(21, 0));
        assert_eq!(sleep_block_minutes(&repaired[0], 0), MINUTES_PER_DAY);
    }

    #[test]
    fn sleep_fills_the_day_to_exactly_24_hours() {
        let repaired = reconciler().reconcile_day(vec![
            block((8, 0), (10, 0), "Gym"),
            block((10, 0), (18, 0), "Work"),
        ]);
        assert_eq!(repaired.len(), 3);
        let sleep = repaired.last().expect("sleep block present");
        assert!(sleep.is_sleep());
        assert_eq!(sleep.start, time(18, 0));
        assert_eq!(sleep.duration_hours(), 14.0);
        let total: i64 = repaired.iter().map(TimeBlock::duration_minutes).sum();
        assert_eq!(total, MINUTES_PER_DAY);
    }

    #[test]
    fn existing_sleep_block_is_resized_not_duplicated() {
        let repaired = reconciler().reconcile_day(vec![
            block((8, 0), (20, 0), "Work"),
            block((21, 0), (5, 0), "Sleep"),
        ]);
        assert_eq!(repaired.len(), 2);
        let sleep = &repaired[1];
        // Sleep re-anchors to the end of the last non-sleep block.
        assert_eq!(sleep.start, time(20, 0));
        assert_eq!(sleep.duration_hours(), 12.0);
    }

    #[test]
    fn multiple_sleep_blocks_collapse_keeping_the_first_label() {
        let repaired = reconciler().reconcile_day(vec![
            block((9, 0), (17, 0), "Work"),
            block((13, 0), (14, 0), "Nap Sleep"),
            block((22, 0), (6, 0), "Sleep"),
        ]);
        assert_eq!(repaired.len(), 2);
        assert_eq!(repaired[1].label, "Nap Sleep");
        assert_eq!(repaired[1].duration_hours(), 16.0);
    }

    #[test]
    fn overfull_day_clamps_sleep_to_zero() {
        let repaired = reconciler().reconcile_day(vec![
            block((0, 0), (14, 0), "Shift A"),
            block((14, 0), (6, 0), "Shift B"),
        ]);
        let sleep = repaired.last().expect("sleep block present");
        assert!(sleep.is_sleep());
        // Zero allocation renders as equal endpoints anchored to the last
        // non-sleep block.
        assert_eq!(sleep.start, time(6, 0));
        assert_eq!(sleep.end, time(6, 0));
        assert_eq!(sleep.duration_minutes(), 0);
    }

    #[test]
    fn sleep_crosses_midnight_when_needed() {
        let repaired = reconciler().reconcile_day(vec![block((6, 0), (22, 0), "Long day")]);
        let sleep = repaired.last().expect("sleep block present");
        assert_eq!(sleep.start, time(22, 0));
        assert_eq!(sleep.end, time(6, 0));
        assert_eq!(sleep.duration_hours(), 8.0);
    }

    #[test]
    fn reconcile_covers_all_days_and_sleep_is_always_last() {
        let mut schedule = WeeklySchedule::with_all_days();
        schedule.push_block(Day::Monday, block((22, 0), (6, 0), "Sleep"));
        schedule.push_block(Day::Monday, block((8, 0), (10, 0), "Gym"));
        reconciler().reconcile(&mut schedule);

        for day in Day::ALL {
            let blocks = schedule.day(day);
            assert!(!blocks.is_empty());
            assert!(blocks.last().expect("day has blocks").is_sleep());
            assert_eq!(
                blocks.iter().filter(|b| b.is_sleep()).count(),
                1,
                "{} should have exactly one sleep block",
                day.name()
            );
        }
        // The misplaced sleep block moved behind the gym block.
        assert_eq!(schedule.day(Day::Monday)[0].label, "Gym");
    }

    proptest! {
        #[test]
        fn reconciled_day_totals_24_hours_when_not_overfull(
            hours in proptest::collection::vec(1i64..6, 1..4),
        ) {
            let mut start = 6 * 60i64;
            let mut blocks = Vec::new();
            for span in hours {
                let end = start + span * 60;
                blocks.push(TimeBlock::new(
                    time((start / 60) as u32, (start % 60) as u32),
                    time(((end / 60) % 24) as u32, (end % 60) as u32),
                    "Task",
                ));
                start = end;
            }
            let repaired = reconciler().reconcile_day(blocks);
            let total: i64 = repaired.iter().map(TimeBlock::duration_minutes).sum();
            prop_assert_eq!(total, MINUTES_PER_DAY);
        }

        #[test]
        fn reconcile_day_is_idempotent(
            hours in proptest::collection::vec(1i64..8, 0..4),
        ) {
            let mut start = 7 * 60i64;
            let mut blocks = Vec::new();
            for span in hours {
                let end = start + span * 60;
                blocks.push(TimeBlock::new(
                    time((start / 60) as u32, (start % 60) as u32),
                    time(((end / 60) % 24) as u32, (end % 60) as u32),
                    "Task",
                ));
                start = end;
            }
            let once = reconciler().reconcile_day(blocks);
            let twice = reconciler().reconcile_day(once.clone());
            prop_assert_eq!(twice, once);
        }
    }
}

use crate::domain::models::{Day, TimeBlock, WeeklySchedule};

/// Segments raw generated text into per-day block lists with a single
/// line-oriented pass. The scan is deliberately permissive: anything that
/// is neither a known day header nor a parsable time block is dropped, so
/// malformed input can only ever shrink the result, never fail it.
///
/// Duplicate day headers re-open scanning for that day, but the flush
/// never overwrites an already-finalized entry, so a later duplicate
/// segment's blocks are discarded.
pub fn extract_day_blocks(raw: &str) -> WeeklySchedule {
    let mut schedule = WeeklySchedule::new();
    let mut current_day: Option<Day> = None;
    let mut pending: Vec<TimeBlock> = Vec::new();

    let flush = |schedule: &mut WeeklySchedule, day: Option<Day>, blocks: Vec<TimeBlock>| {
        let Some(day) = day else {
            return;
        };
        if schedule.contains_day(day) {
            log::debug!(
                "discarding {} block(s) from duplicate {} segment",
                blocks.len(),
                day.name()
            );
            return;
        }
        schedule.set_day(day, blocks);
    };

    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(day) = Day::from_header(trimmed) {
            flush(&mut schedule, current_day, std::mem::take(&mut pending));
            current_day = Some(day);
            continue;
        }

        if current_day.is_some() {
            if let Some(block) = TimeBlock::parse_line(trimmed) {
                pending.push(block);
            }
        }
    }
    flush(&mut schedule, current_day, pending);

    for day in Day::ALL {
        if !schedule.contains_day(day) {
            schedule.set_day(day, Vec::new());
        }
    }
    schedule
}

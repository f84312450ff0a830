use crate::domain::models::{Day, WeeklySchedule};
use crate::infrastructure::calendar_client::{CalendarClient, CalendarEvent, CalendarEventDateTime};
use crate::infrastructure::error::InfraError;
use chrono::{NaiveDate, TimeZone};
use chrono_tz::Tz;
use std::sync::Arc;

/// Pushes a validated weekly schedule to the calendar: one event per
/// non-sleep block, dated from the given week-start Monday, rendered in
/// the configured timezone. Blocks that cross midnight end on the next
/// date. Gating on the validation report is the caller's decision; this
/// service only walks whatever schedule it is handed.
pub struct CalendarSyncService<C: CalendarClient> {
    calendar_client: Arc<C>,
    timezone: Tz,
}

impl<C: CalendarClient> CalendarSyncService<C> {
    pub fn new(calendar_client: Arc<C>, timezone: Tz) -> Self {
        Self {
            calendar_client,
            timezone,
        }
    }

    pub async fn push_week(
        &self,
        access_token: &str,
        calendar_id: &str,
        schedule: &WeeklySchedule,
        week_start: NaiveDate,
    ) -> Result<Vec<String>, InfraError> {
        let mut created_ids = Vec::new();

        for day in Day::ALL {
            let date = week_start + chrono::Duration::days(day.offset_from_monday());
            for block in schedule.day(day) {
                if block.is_sleep() {
                    continue;
                }

                let end_date = if block.end < block.start {
                    date + chrono::Duration::days(1)
                } else {
                    date
                };
                let Some(start) = self
                    .timezone
                    .from_local_datetime(&date.and_time(block.start))
                    .earliest()
                else {
                    log::warn!(
                        "skipping block {:?} on {}: start does not exist in {}",
                        block.label,
                        date,
                        self.timezone
                    );
                    continue;
                };
                let Some(end) = self
                    .timezone
                    .from_local_datetime(&end_date.and_time(block.end))
                    .earliest()
                else {
                    log::warn!(
                        "skipping block {:?} on {}: end does not exist in {}",
                        block.label,
                        date,
                        self.timezone
                    );
                    continue;
                };

                let event = CalendarEvent {
                    id: None,
                    summary: Some(block.label.clone()),
                    status: Some("confirmed".to_string()),
                    start: CalendarEventDateTime {
                        date_time: start.to_rfc3339(),
                        time_zone: Some(self.timezone.name().to_string()),
                    },
                    end: CalendarEventDateTime {
                        date_time: end.to_rfc3339(),
                        time_zone: Some(self.timezone.name().to_string()),
                    },
                };
                let created_id = self
                    .calendar_client
                    .create_event(access_token, calendar_id, &event)
                    .await?;
                created_ids.push(created_id);
            }
        }

        log::info!("created {} calendar event(s)", created_ids.len());
        Ok(created_ids)
    }
}

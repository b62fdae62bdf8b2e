//! Conversion from Notion pages to calendar events.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use notionical_core::CalendarEvent;
use notionical_core::error::{DataError, DataResult};
use tracing::{debug, warn};

use crate::fields::FieldNames;
use crate::types::{DateValue, FullPage, PageObject};

/// Length of a date-only value (`YYYY-MM-DD`)
const DATE_ONLY_LEN: usize = 10;

const UID_DOMAIN: &str = "notionical";

/// What to do with a record that has the right shape but unusable data
/// (empty title, unparsable date, misconfigured property).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataErrorPolicy {
    /// Drop the record and keep going
    #[default]
    Skip,
    /// Fail the whole feed
    Fail,
}

/// Everything needed to turn pages into events
#[derive(Debug, Clone)]
pub struct EventMapping {
    pub fields: FieldNames,
    pub category_fallback: String,
    pub on_data_error: DataErrorPolicy,
}

impl EventMapping {
    /// Map a batch of query results, preserving their order.
    ///
    /// Partial pages and pages without a date are left out. Data errors are
    /// handled according to `on_data_error`.
    pub fn map_records(&self, records: Vec<PageObject>) -> DataResult<Vec<CalendarEvent>> {
        let mut events = Vec::with_capacity(records.len());

        for record in records {
            match self.map_record(record) {
                Ok(Some(event)) => events.push(event),
                Ok(None) => {}
                Err(err) => match self.on_data_error {
                    DataErrorPolicy::Skip => {
                        warn!(record = err.record(), "Skipping record: {}", err);
                    }
                    DataErrorPolicy::Fail => return Err(err),
                },
            }
        }

        Ok(events)
    }

    /// Map a single page. `Ok(None)` means the page is not an event.
    pub fn map_record(&self, record: PageObject) -> DataResult<Option<CalendarEvent>> {
        let id = record.id.clone();
        let Some(page) = record.into_full() else {
            debug!(record = %id, "Skipping partial page");
            return Ok(None);
        };

        let fields = &self.fields;
        let Some(date) = page.date(&fields.datetime)? else {
            debug!(record = %page.id, "Skipping page without a date");
            return Ok(None);
        };

        let category = page.category(&fields.category)?;
        let title = page.title(&fields.title)?;
        let location = page.location(&fields.location)?;

        let (start, end, all_day) = event_range(&page, date)?;

        let title = title
            .first()
            .map(|run| run.plain_text.as_str())
            .ok_or_else(|| DataError::EmptyTitle {
                record: page.id.clone(),
            })?;
        let summary = format!(
            "[{}] {}",
            category.unwrap_or(self.category_fallback.as_str()),
            title
        );

        Ok(Some(CalendarEvent {
            uid: format!("{}@{}", page.id, UID_DOMAIN),
            summary,
            start,
            end,
            all_day,
            location: location.map(str::to_string),
            url: page.url.clone(),
            updated: page.last_edited_time,
        }))
    }
}

/// Start, exclusive end, and all-day flag for a date property.
///
/// Date-only ranges in Notion include their end day, so all-day events get
/// one day added to the end.
fn event_range(
    page: &FullPage,
    date: &DateValue,
) -> DataResult<(DateTime<Utc>, DateTime<Utc>, bool)> {
    let all_day = date.start.len() == DATE_ONLY_LEN;
    let time_zone = date.time_zone.as_deref();

    let start = parse_instant(&page.id, &date.start, time_zone)?;
    let end = match date.end {
        Some(ref end) => parse_instant(&page.id, end, time_zone)?,
        None => start,
    };

    let end = if all_day { end + Duration::days(1) } else { end };

    Ok((start, end, all_day))
}

/// Parse a Notion date or date-time into UTC.
///
/// - `YYYY-MM-DD` is midnight UTC of that day
/// - date-times with an offset are converted to UTC
/// - date-times without an offset are read in `time_zone`, or UTC if unset
fn parse_instant(record: &str, value: &str, time_zone: Option<&str>) -> DataResult<DateTime<Utc>> {
    let invalid = |reason: String| DataError::InvalidDate {
        record: record.to_string(),
        value: value.to_string(),
        reason,
    };

    if value.len() == DATE_ONLY_LEN {
        let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|e| invalid(e.to_string()))?;
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .map_err(|e| invalid(e.to_string()))?;

    match time_zone {
        None => Ok(naive.and_utc()),
        Some(name) => {
            let tz: Tz = name
                .parse()
                .map_err(|_| invalid(format!("unknown time zone '{}'", name)))?;
            tz.from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(|| invalid(format!("does not exist in {}", name)))
        }
    }
}

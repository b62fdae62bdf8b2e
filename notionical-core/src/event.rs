//! Provider-neutral event types.
//!
//! Providers convert their records into these types, and the server works
//! exclusively with them when rendering the feed.

use chrono::{DateTime, NaiveDate, Utc};

/// A calendar event ready to be rendered as a VEVENT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    /// Stable identifier (UID), derived from the source record
    pub uid: String,
    pub summary: String,
    pub start: DateTime<Utc>,
    /// Exclusive end. For all-day events this is midnight after the last day.
    pub end: DateTime<Utc>,
    pub all_day: bool,
    pub location: Option<String>,
    /// Link back to the source record
    pub url: String,
    /// Last modification of the source record (DTSTAMP, LAST-MODIFIED)
    pub updated: Option<DateTime<Utc>>,
}

impl CalendarEvent {
    /// Start as it should be written to DTSTART
    pub fn start_time(&self) -> EventTime {
        EventTime::at(self.start, self.all_day)
    }

    /// End as it should be written to DTEND
    pub fn end_time(&self) -> EventTime {
        EventTime::at(self.end, self.all_day)
    }
}

/// A point in time as it appears in an ICS property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTime {
    Date(NaiveDate),
    DateTimeUtc(DateTime<Utc>),
}

impl EventTime {
    fn at(instant: DateTime<Utc>, all_day: bool) -> Self {
        if all_day {
            EventTime::Date(instant.date_naive())
        } else {
            EventTime::DateTimeUtc(instant)
        }
    }
}

//! ICS feed generation.

use crate::event::{CalendarEvent, EventTime};
use icalendar::{Calendar, Component, EventLike, Property, ValueType};

const PRODID: &str = "-//notionical//notionical//EN";

/// Render a named calendar containing every event, in the given order.
pub fn generate_feed(name: &str, events: &[CalendarEvent]) -> String {
    let mut cal = Calendar::new();

    // NAME (RFC 7986) and X-WR-CALNAME (de facto standard)
    cal.append_property(Property::new("NAME", name));
    cal.append_property(Property::new("X-WR-CALNAME", name));

    for event in events {
        cal.push(build_event(event));
    }

    let cal = cal.done();

    rewrite_header(&cal.to_string())
}

fn build_event(event: &CalendarEvent) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid);
    ics_event.summary(&event.summary);

    // DTSTAMP - required by RFC 5545, use the record's edit time when known
    let dtstamp = event
        .updated
        .unwrap_or_else(chrono::Utc::now)
        .format("%Y%m%dT%H%M%SZ")
        .to_string();
    ics_event.add_property("DTSTAMP", &dtstamp);

    if let Some(updated) = event.updated {
        let last_modified = updated.format("%Y%m%dT%H%M%SZ").to_string();
        ics_event.add_property("LAST-MODIFIED", &last_modified);
    }

    add_datetime_property(&mut ics_event, "DTSTART", &event.start_time());
    add_datetime_property(&mut ics_event, "DTEND", &event.end_time());

    if event.all_day {
        ics_event.add_property("X-MICROSOFT-CDO-ALLDAYEVENT", "TRUE");
    }

    if let Some(ref loc) = event.location {
        ics_event.location(loc);
    }

    ics_event.add_property("URL", &event.url);

    ics_event.done()
}

/// Replace the icalendar crate's PRODID and drop CALSCALE:GREGORIAN (the default)
fn rewrite_header(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

/// Add a date or UTC date-time property
fn add_datetime_property(ics_event: &mut icalendar::Event, name: &str, time: &EventTime) {
    match time {
        EventTime::Date(d) => {
            let mut prop = Property::new(name, d.format("%Y%m%d").to_string());
            prop.append_parameter(ValueType::Date);
            ics_event.append_property(prop);
        }
        EventTime::DateTimeUtc(dt) => {
            ics_event.add_property(name, dt.format("%Y%m%dT%H%M%SZ").to_string());
        }
    }
}

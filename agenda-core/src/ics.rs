//! Sharing events: plain text and .ics export.

use icalendar::{Calendar, Component, Property, ValueType};

use crate::event::Event;

/// Short text used by the share action: title, then date and time.
pub fn share_text(event: &Event) -> String {
    format!("{}\n{} - {}", event.title, event.date.format("%Y-%m-%d"), event.time)
}

/// Generate .ics content holding a single event.
pub fn generate_ics(event: &Event) -> String {
    generate_calendar(std::slice::from_ref(event))
}

/// Generate .ics content holding every given event as an all-day VEVENT.
///
/// The display time is free-form, so it travels as `X-AGENDA-TIME` rather
/// than as part of DTSTART.
pub fn generate_calendar(events: &[Event]) -> String {
    let mut cal = Calendar::new();

    for event in events {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&format!("agenda-{}", event.id));
        ics_event.summary(&event.title);

        // DTSTAMP - required by RFC 5545
        let dtstamp = event
            .updated_at
            .or(event.created_at)
            .unwrap_or_else(chrono::Utc::now)
            .format("%Y%m%dT%H%M%SZ")
            .to_string();
        ics_event.add_property("DTSTAMP", &dtstamp);

        add_date_property(&mut ics_event, "DTSTART", event.date);
        if let Some(next_day) = event.date.succ_opt() {
            add_date_property(&mut ics_event, "DTEND", next_day);
        }

        if !event.description.is_empty() {
            ics_event.description(&event.description);
        }
        if !event.time.is_empty() {
            ics_event.add_property("X-AGENDA-TIME", &event.time);
        }
        ics_event.add_property("X-AGENDA-COLOR", event.color.as_str());

        cal.push(ics_event.done());
    }

    strip_ics_bloat(&cal.done().to_string())
}

fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: chrono::NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}

/// Replace PRODID and drop CALSCALE:GREGORIAN (it's the default).
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:AGENDA\r\n");
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_events;

    fn cita() -> Event {
        seed_events().into_iter().nth(2).unwrap()
    }

    #[test]
    fn share_text_has_title_date_and_time() {
        assert_eq!(share_text(&cita()), "Cita médica\n2025-11-28 - 9:00 AM");
    }

    #[test]
    fn all_day_dates_have_value_date() {
        let ics = generate_ics(&cita());

        assert!(ics.contains("DTSTART;VALUE=DATE:20251128"), "ICS:\n{}", ics);
        assert!(ics.contains("DTEND;VALUE=DATE:20251129"), "ICS:\n{}", ics);
    }

    #[test]
    fn event_fields_are_exported() {
        let ics = generate_ics(&cita());

        assert!(ics.contains("UID:agenda-3"));
        assert!(ics.contains("SUMMARY:Cita médica"));
        assert!(ics.contains("DESCRIPTION:Chequeo general anual"));
        assert!(ics.contains("X-AGENDA-TIME:9:00 AM"));
        assert!(ics.contains("X-AGENDA-COLOR:#45B7D1"));
    }

    #[test]
    fn output_is_stripped() {
        let ics = generate_ics(&cita());
        assert!(ics.contains("PRODID:AGENDA"));
        assert!(!ics.contains("CALSCALE"));
    }

    #[test]
    fn calendar_holds_every_event() {
        let ics = generate_calendar(&seed_events());
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 4);
    }

    #[test]
    fn empty_description_is_omitted() {
        let mut event = cita();
        event.description.clear();
        assert!(!generate_ics(&event).contains("DESCRIPTION"));
    }
}

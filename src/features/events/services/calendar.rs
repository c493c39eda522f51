//! Calendar exports for an event: iCalendar files and Google Calendar links.

use chrono::{DateTime, Utc};
use minijinja::context;

use crate::core::error::Result;
use crate::features::events::models::{Event, Organization};
use crate::shared::templates::render_template;

const ICS_TEMPLATE: &str = "calendar/event.ics.jinja";
const UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Everything needed to describe an event in a calendar
#[derive(Debug, Clone)]
pub struct CalendarEntry {
    pub uid: String,
    pub summary: String,
    pub description: String,
    pub location: String,
    pub time_zone: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub url: Option<String>,
    pub organizer: Option<Organization>,
}

impl CalendarEntry {
    /// The summary names the ticket category when one is known
    pub fn new(
        event: &Event,
        category_name: Option<&str>,
        description: String,
        organizer: Option<Organization>,
    ) -> Self {
        let summary = match category_name {
            Some(category) => format!("{} - {}", event.display_name, category),
            None => event.display_name.clone(),
        };

        Self {
            uid: format!("{}@{}", event.id, event.short_name),
            summary,
            description,
            location: event.location.clone(),
            time_zone: event.time_zone.clone(),
            start: event.start_ts,
            end: event.end_ts,
            url: event.website_url.clone(),
            organizer,
        }
    }

    /// Google Calendar "add event" template URL
    pub fn google_calendar_url(&self) -> String {
        format!(
            "https://www.google.com/calendar/event?action=TEMPLATE&dates={}/{}&ctz={}&text={}&location={}&details={}",
            self.start.format(UTC_FORMAT),
            self.end.format(UTC_FORMAT),
            urlencoding::encode(&self.time_zone),
            urlencoding::encode(&self.summary),
            urlencoding::encode(&self.location),
            urlencoding::encode(&self.description),
        )
    }

    /// iCalendar document with CRLF line endings
    pub fn to_ics(&self, now: DateTime<Utc>) -> Result<String> {
        let (organizer_name, organizer_email) = match &self.organizer {
            Some(org) => (Some(escape_text(&org.name)), Some(org.email.clone())),
            None => (None, None),
        };

        let rendered = render_template(
            ICS_TEMPLATE,
            context! {
                uid => self.uid,
                stamp => now.format(UTC_FORMAT).to_string(),
                start => self.start.format(UTC_FORMAT).to_string(),
                end => self.end.format(UTC_FORMAT).to_string(),
                summary => escape_text(&self.summary),
                description => escape_text(&self.description),
                location => escape_text(&self.location),
                url => self.url,
                organizer_name => organizer_name,
                organizer_email => organizer_email,
            },
        )?;

        let mut ics = rendered.lines().collect::<Vec<_>>().join("\r\n");
        ics.push_str("\r\n");
        Ok(ics)
    }
}

/// Escape a TEXT value (RFC 5545 §3.3.11)
fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str(r"\\"),
            ';' => escaped.push_str(r"\;"),
            ',' => escaped.push_str(r"\,"),
            '\n' => escaped.push_str(r"\n"),
            '\r' => {}
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::shared::test_helpers::sample_event;

    fn entry() -> CalendarEntry {
        let mut event = sample_event();
        event.start_ts = Utc.with_ymd_and_hms(2025, 9, 10, 7, 0, 0).unwrap();
        event.end_ts = Utc.with_ymd_and_hms(2025, 9, 10, 16, 0, 0).unwrap();
        CalendarEntry::new(
            &event,
            Some("Early bird"),
            "Talks, workshops; and more".to_string(),
            Some(Organization {
                id: 1,
                name: "Rust Meetup".to_string(),
                email: "info@example.org".to_string(),
            }),
        )
    }

    #[test]
    fn test_summary_names_category() {
        let entry = entry();
        assert_eq!(entry.summary, "Tech Summit - Early bird");

        let plain = CalendarEntry::new(&sample_event(), None, String::new(), None);
        assert_eq!(plain.summary, "Tech Summit");
    }

    #[test]
    fn test_google_calendar_url() {
        let url = entry().google_calendar_url();

        assert!(url.starts_with("https://www.google.com/calendar/event?action=TEMPLATE"));
        assert!(url.contains("dates=20250910T070000Z/20250910T160000Z"));
        assert!(url.contains("text=Tech%20Summit%20-%20Early%20bird"));
        assert!(url.contains("ctz=Europe%2FZurich"));
    }

    #[test]
    fn test_ics_document() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let ics = entry().to_ics(now).unwrap();

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
        assert!(ics.contains("DTSTART:20250910T070000Z\r\n"));
        assert!(ics.contains("DTSTAMP:20250601T120000Z\r\n"));
        assert!(ics.contains(r"DESCRIPTION:Talks\, workshops\; and more"));
        assert!(ics.contains("ORGANIZER;CN=Rust Meetup:mailto:info@example.org\r\n"));
        assert!(!ics.contains("\n\n"));
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a,b;c\\d\r\ne"), r"a\,b\;c\\d\ne");
    }
}

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::shared::i18n::{DateFormat, SupportedLanguage};

/// Parse an IANA timezone name, falling back to UTC for unknown values
pub fn parse_timezone(name: &str) -> Tz {
    name.parse::<Tz>().unwrap_or_else(|_| {
        tracing::warn!("Unknown timezone '{}', falling back to UTC", name);
        Tz::UTC
    })
}

/// Format an instant in the given timezone once per language, keyed by language code
pub fn formatted_dates(
    languages: &[&SupportedLanguage],
    instant: DateTime<Utc>,
    zone: Tz,
    format: DateFormat,
) -> HashMap<String, String> {
    let local = instant.with_timezone(&zone);
    languages
        .iter()
        .map(|lang| {
            let formatted = local
                .format_localized(lang.pattern(format), lang.locale)
                .to_string();
            (lang.code.to_string(), formatted)
        })
        .collect()
}

/// True when both instants fall on the same calendar day in the event's timezone
pub fn is_same_day(begin: DateTime<Utc>, end: DateTime<Utc>, zone: Tz) -> bool {
    begin.with_timezone(&zone).date_naive() == end.with_timezone(&zone).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::i18n::find_language;
    use chrono::TimeZone;

    #[test]
    fn test_formatted_dates_per_language() {
        let en = find_language("en").unwrap();
        let it = find_language("it").unwrap();
        let instant = Utc.with_ymd_and_hms(2025, 3, 14, 17, 30, 0).unwrap();

        let dates = formatted_dates(
            &[en, it],
            instant,
            parse_timezone("Europe/Rome"),
            DateFormat::EventTime,
        );

        assert_eq!(dates.get("it").map(String::as_str), Some("18:30"));
        assert_eq!(dates.get("en").map(String::as_str), Some("06:30 PM"));
    }

    #[test]
    fn test_same_day_depends_on_timezone() {
        let begin = Utc.with_ymd_and_hms(2025, 3, 14, 20, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 3, 14, 23, 30, 0).unwrap();

        assert!(is_same_day(begin, end, Tz::UTC));
        assert!(!is_same_day(begin, end, parse_timezone("Europe/Zurich")));
    }

    #[test]
    fn test_unknown_timezone_falls_back_to_utc() {
        assert_eq!(parse_timezone("Mars/Olympus_Mons"), Tz::UTC);
    }
}

//! Languages the public frontend can be displayed in, and the date patterns
//! used for each of them.

use chrono::Locale;

/// Named date patterns, one per kind of date the API exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// Day of an event (begin/end)
    EventDate,
    /// Time of an event (begin/end)
    EventTime,
    /// Sale window of ticket categories and additional services
    TicketCategoryDate,
}

#[derive(Debug, Clone, Copy)]
pub struct SupportedLanguage {
    pub code: &'static str,
    pub locale: Locale,
    date_pattern: &'static str,
    time_pattern: &'static str,
    ticket_category_pattern: &'static str,
}

impl SupportedLanguage {
    pub fn pattern(&self, format: DateFormat) -> &'static str {
        match format {
            DateFormat::EventDate => self.date_pattern,
            DateFormat::EventTime => self.time_pattern,
            DateFormat::TicketCategoryDate => self.ticket_category_pattern,
        }
    }
}

pub const SUPPORTED_LANGUAGES: &[SupportedLanguage] = &[
    SupportedLanguage {
        code: "en",
        locale: Locale::en_US,
        date_pattern: "%a %d %B %Y",
        time_pattern: "%I:%M %p",
        ticket_category_pattern: "%d %B %Y %I:%M %p",
    },
    SupportedLanguage {
        code: "it",
        locale: Locale::it_IT,
        date_pattern: "%a %d %B %Y",
        time_pattern: "%H:%M",
        ticket_category_pattern: "%d %B %Y %H:%M",
    },
    SupportedLanguage {
        code: "de",
        locale: Locale::de_DE,
        date_pattern: "%a, %d. %B %Y",
        time_pattern: "%H:%M",
        ticket_category_pattern: "%d. %B %Y %H:%M",
    },
    SupportedLanguage {
        code: "fr",
        locale: Locale::fr_FR,
        date_pattern: "%a %d %B %Y",
        time_pattern: "%H:%M",
        ticket_category_pattern: "%d %B %Y %H:%M",
    },
    SupportedLanguage {
        code: "nl",
        locale: Locale::nl_NL,
        date_pattern: "%a %d %B %Y",
        time_pattern: "%H:%M",
        ticket_category_pattern: "%d %B %Y %H:%M",
    },
    SupportedLanguage {
        code: "es",
        locale: Locale::es_ES,
        date_pattern: "%a %d de %B de %Y",
        time_pattern: "%H:%M",
        ticket_category_pattern: "%d de %B de %Y %H:%M",
    },
];

/// Look up a supported language by its primary subtag ("de-CH" resolves to "de")
pub fn find_language(tag: &str) -> Option<&'static SupportedLanguage> {
    let primary = tag.split(['-', '_']).next().unwrap_or(tag).to_lowercase();
    SUPPORTED_LANGUAGES.iter().find(|l| l.code == primary)
}

/// Supported languages restricted to the ones an event publishes content in.
///
/// Events without configured languages fall back to every supported language.
pub fn event_languages(event_languages: &[String]) -> Vec<&'static SupportedLanguage> {
    let languages: Vec<_> = event_languages
        .iter()
        .filter_map(|l| find_language(l))
        .collect();

    if languages.is_empty() {
        SUPPORTED_LANGUAGES.iter().collect()
    } else {
        languages
    }
}

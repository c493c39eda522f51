use std::collections::HashMap;

use pulldown_cmark::{html, Event, Options, Parser};

/// Render organizer-provided Markdown to HTML.
///
/// Raw HTML blocks are emitted as escaped text.
pub fn render(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(source, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut output = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

/// Render every value of a locale -> Markdown map
pub fn render_all(descriptions: HashMap<String, String>) -> HashMap<String, String> {
    descriptions
        .into_iter()
        .map(|(locale, text)| (locale, render(&text)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        assert_eq!(render("**Early bird**"), "<p><strong>Early bird</strong></p>\n");
    }

    #[test]
    fn test_render_escapes_raw_html() {
        let rendered = render("<script>alert(1)</script>");
        assert!(!rendered.contains("<script>"));
        assert!(rendered.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_all_keeps_locales() {
        let mut input = HashMap::new();
        input.insert("en".to_string(), "Hello".to_string());
        input.insert("it".to_string(), "Ciao".to_string());

        let rendered = render_all(input);
        assert_eq!(rendered.get("it").map(String::as_str), Some("<p>Ciao</p>\n"));
        assert_eq!(rendered.len(), 2);
    }
}

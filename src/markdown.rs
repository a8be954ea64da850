//! Project Description Markdown
//!
//! pulldown-cmark with two adjustments for content shown in the modal:
//! - raw HTML in the source is rendered as text
//! - absolute links open in a new tab without an opener reference

use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag, TagEnd};

/// Parse markdown to HTML
pub fn parse_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

/// Parse markdown for inline use (strips outer <p> tags)
pub fn parse_markdown_inline(text: &str) -> String {
    let html = parse_markdown(text);

    html.trim()
        .strip_prefix("<p>")
        .and_then(|s| s.strip_suffix("</p>"))
        .map(|s| s.to_string())
        .unwrap_or(html)
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    // links never nest, so one flag tracks the open one
    let mut in_external_link = false;

    for event in parser {
        match event {
            Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),

            Event::Start(Tag::Link { dest_url, title, .. }) if is_external(&dest_url) => {
                let title_attr = if title.is_empty() {
                    String::new()
                } else {
                    format!(r#" title="{}""#, escape_html(&title))
                };
                let html = format!(
                    r#"<a href="{}"{} target="_blank" rel="noopener noreferrer">"#,
                    escape_html(&dest_url),
                    title_attr
                );
                events.push(Event::Html(CowStr::from(html)));
                in_external_link = true;
            }

            Event::End(TagEnd::Link) if in_external_link => {
                events.push(Event::Html(CowStr::from("</a>")));
                in_external_link = false;
            }

            other => events.push(other),
        }
    }

    events
}

fn is_external(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markup() {
        let html = parse_markdown("**Leaflet** map with _live_ sync");
        assert!(html.contains("<strong>Leaflet</strong>"));
        assert!(html.contains("<em>live</em>"));
    }

    #[test]
    fn test_lists_render() {
        let html = parse_markdown("- swipe\n- map\n");
        assert!(html.contains("<ul>"));
        assert_eq!(html.matches("<li>").count(), 2);
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = parse_markdown("hello <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_html_block_is_escaped() {
        let html = parse_markdown("<div onclick=\"x()\">block</div>\n");
        assert!(!html.contains("<div"));
    }

    #[test]
    fn test_external_links_open_in_new_tab() {
        let html = parse_markdown("[demo](https://example.com/demo \"Live\")");
        assert!(html.contains(r#"<a href="https://example.com/demo" title="Live" target="_blank" rel="noopener noreferrer">demo</a>"#));
    }

    #[test]
    fn test_relative_links_stay_plain() {
        let html = parse_markdown("[top](#projects)");
        assert!(html.contains(r##"<a href="#projects">top</a>"##));
        assert!(!html.contains("_blank"));
    }

    #[test]
    fn test_inline_strips_paragraph() {
        assert_eq!(parse_markdown_inline("a *b*"), "a <em>b</em>");
        let list = parse_markdown_inline("- x");
        assert!(list.starts_with("<ul>"));
    }
}

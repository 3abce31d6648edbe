//! Per-page XML parsing and content filtering.

use quick_xml::Reader;
use quick_xml::events::Event;

use super::types::{ArticleRecord, PageParseError};

/// Literal prefix marking a page as a redirect stub rather than article content.
const REDIRECT_MARKER: &str = "#redirect";

/// Outcome of parsing one raw page span.
#[derive(Debug)]
pub enum ParseOutcome {
    /// The page produced an article record.
    Article(ArticleRecord),
    /// The page was filtered out: no text element, empty text, or a redirect stub.
    Skipped,
}

/// Which field the currently open element feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    Title,
    Text,
}

#[derive(Debug, Default)]
struct ExtractedFields {
    title: Option<String>,
    text: Option<String>,
}

/// Parse one raw page span into an article record.
///
/// The lines are joined and parsed as a standalone XML fragment; the first `<title>`
/// element and the first `<text>` element at any depth are extracted, with entities
/// unescaped. Pages without usable text and redirect stubs come back as
/// [`ParseOutcome::Skipped`]. Malformed markup fails with a [`PageParseError`] scoped
/// to this page alone; parsing has no other side effects.
pub fn parse_page(lines: &[String]) -> Result<ParseOutcome, PageParseError> {
    let blob = lines.join("\n");
    let fields = extract_fields(&blob)?;

    let Some(raw_text) = fields.text else {
        return Ok(ParseOutcome::Skipped);
    };
    let trimmed = raw_text.trim();
    if trimmed.is_empty() || is_redirect(trimmed) {
        return Ok(ParseOutcome::Skipped);
    }

    Ok(ParseOutcome::Article(ArticleRecord {
        title: fields.title,
        text: normalize_whitespace(trimmed),
    }))
}

/// Stream the fragment's events, collecting the first title and text contents.
///
/// The reader runs to end of input even after both fields are captured, so trailing
/// malformed markup still fails the page rather than being silently accepted.
fn extract_fields(blob: &str) -> Result<ExtractedFields, PageParseError> {
    let mut reader = Reader::from_str(blob);
    let mut fields = ExtractedFields::default();
    let mut capture: Option<Capture> = None;
    let mut pending = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) if capture.is_none() => {
                let target = match start.name().as_ref() {
                    b"title" if fields.title.is_none() => Some(Capture::Title),
                    b"text" if fields.text.is_none() => Some(Capture::Text),
                    _ => None,
                };
                if target.is_some() {
                    capture = target;
                    pending.clear();
                }
            }
            Event::Text(text) if capture.is_some() => {
                pending.push_str(&text.unescape()?);
            }
            Event::CData(data) if capture.is_some() => {
                pending.push_str(&String::from_utf8_lossy(&data));
            }
            Event::End(end) => match capture {
                Some(Capture::Title) if end.name().as_ref() == b"title" => {
                    fields.title = Some(std::mem::take(&mut pending));
                    capture = None;
                }
                Some(Capture::Text) if end.name().as_ref() == b"text" => {
                    fields.text = Some(std::mem::take(&mut pending));
                    capture = None;
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(fields)
}

/// ASCII case-insensitive check for the redirect prefix.
///
/// The marker is pure ASCII, so a byte-range prefix comparison is safe; `get` returns
/// `None` when the text is shorter than the marker or the range splits a multi-byte
/// character, and neither can be a redirect.
fn is_redirect(text: &str) -> bool {
    text.get(..REDIRECT_MARKER.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(REDIRECT_MARKER))
}

/// Collapse every line break in the extracted text into a single space.
fn normalize_whitespace(text: &str) -> String {
    text.replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(xml: &str) -> Vec<String> {
        xml.lines().map(str::to_string).collect()
    }

    fn article(xml: &str) -> ArticleRecord {
        match parse_page(&span(xml)).expect("well-formed page") {
            ParseOutcome::Article(record) => record,
            ParseOutcome::Skipped => panic!("expected an article, page was filtered"),
        }
    }

    fn skipped(xml: &str) -> bool {
        matches!(
            parse_page(&span(xml)).expect("well-formed page"),
            ParseOutcome::Skipped
        )
    }

    #[test]
    fn extracts_title_and_nested_text() {
        let record = article(
            "<page>\n  <title>Rust</title>\n  <revision>\n    <text>A systems language.</text>\n  </revision>\n</page>",
        );
        assert_eq!(record.title.as_deref(), Some("Rust"));
        assert_eq!(record.text, "A systems language.");
    }

    #[test]
    fn collapses_line_breaks_into_spaces() {
        let record = article("<page><title>A</title><text>Hello\nworld</text></page>");
        assert_eq!(record.text, "Hello world");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_whitespace("Hello\nthere\nworld");
        assert_eq!(normalize_whitespace(&once), once);
    }

    #[test]
    fn missing_title_is_permitted() {
        let record = article("<page><text>body text</text></page>");
        assert_eq!(record.title, None);
        assert_eq!(record.text, "body text");
    }

    #[test]
    fn missing_text_element_filters_the_page() {
        assert!(skipped("<page><title>Stub</title></page>"));
    }

    #[test]
    fn whitespace_only_text_filters_the_page() {
        assert!(skipped("<page><title>Blank</title><text>   \n\t  </text></page>"));
    }

    #[test]
    fn redirect_prefix_filters_the_page_case_insensitively() {
        assert!(skipped("<page><title>B</title><text>#REDIRECT [[A]]</text></page>"));
        assert!(skipped("<page><title>B</title><text>#redirect [[A]]</text></page>"));
        assert!(skipped("<page><title>B</title><text>  #Redirect [[A]]</text></page>"));
    }

    #[test]
    fn redirect_marker_mid_text_is_kept() {
        let record = article("<page><title>C</title><text>See #REDIRECT semantics.</text></page>");
        assert_eq!(record.text, "See #REDIRECT semantics.");
    }

    #[test]
    fn entities_are_unescaped() {
        let record = article("<page><title>AT&amp;T</title><text>Ampersands &amp; angles &lt;ok&gt;</text></page>");
        assert_eq!(record.title.as_deref(), Some("AT&T"));
        assert_eq!(record.text, "Ampersands & angles <ok>");
    }

    #[test]
    fn first_text_element_wins() {
        let record = article(
            "<page><title>D</title><revision><text>first body</text></revision><revision><text>second body</text></revision></page>",
        );
        assert_eq!(record.text, "first body");
    }

    #[test]
    fn mismatched_tags_fail_only_this_page() {
        let result = parse_page(&span(
            "<page><title>Broken</title><text>has a <ref>stray tag</text></page>",
        ));
        assert!(result.is_err());
    }
}

//! HTML versus plain-text detection for fetched payloads

/// How many leading characters of a body are inspected when sniffing for markup.
pub const SNIFF_WINDOW: usize = 1000;

/// Kind of content a fetched payload holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Html,
    Plain,
}

/// Decide whether a payload is HTML or plain text
///
/// Rules are evaluated in order and the first match wins:
/// 1. The declared content type mentions `text/html`.
/// 2. The trimmed body opens with a `<!doctype` declaration, or an `<html` tag
///    shows up within the first [`SNIFF_WINDOW`] characters.
/// 3. Anything else is plain text.
///
/// Servers that mislabel their pages still get caught by rule 2.
pub fn classify(body: &str, declared_content_type: &str) -> ContentKind {
    if declared_content_type
        .to_ascii_lowercase()
        .contains("text/html")
    {
        return ContentKind::Html;
    }

    if starts_with_doctype(body) || has_root_tag(body) {
        return ContentKind::Html;
    }

    ContentKind::Plain
}

fn starts_with_doctype(body: &str) -> bool {
    body.trim_start()
        .get(..9)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("<!doctype"))
}

fn has_root_tag(body: &str) -> bool {
    let prefix: String = body.chars().take(SNIFF_WINDOW).collect();
    prefix.to_ascii_lowercase().contains("<html")
}

//! HTML to Markdown normalization
//!
//! Pages are parsed with an HTML5 parser that recovers from malformed markup,
//! re-serialized with element nesting capped at [`MAX_NESTING_DEPTH`], and
//! converted with `htmd` using ATX headings (`#` through `######`). Elements
//! nested deeper than the cap contribute their text only, so hostile pages
//! cannot exhaust the converter's stack.

use regex::Regex;
use scraper::{Html, Node};
use std::sync::LazyLock;

/// Deepest element nesting passed on to the Markdown converter
pub const MAX_NESTING_DEPTH: usize = 128;

/// Tags whose content never reaches the output
const NON_CONTENT_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

static BLANK_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("static regex is valid"));

/// Convert an HTML document into clean Markdown
///
/// Never fails: whitespace-only input yields an empty string and broken markup
/// is rendered on a best-effort basis.
pub fn normalize_html(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let document = Html::parse_document(html);
    let markup = bounded_markup(&document, MAX_NESTING_DEPTH);

    let options = htmd::options::Options {
        heading_style: htmd::options::HeadingStyle::Atx,
        code_block_style: htmd::options::CodeBlockStyle::Fenced,
        link_style: htmd::options::LinkStyle::Inlined,
        ..Default::default()
    };
    let converter = htmd::HtmlToMarkdown::builder()
        .options(options)
        .skip_tags(NON_CONTENT_TAGS.to_vec())
        .build();

    match converter.convert(&markup) {
        Ok(markdown) => tidy(&markdown),
        Err(_) => tidy(&plain_text(&document)),
    }
}

/// Serialize a parsed document, flattening elements nested past `max_depth`
///
/// The walk uses an explicit stack, so arbitrarily deep trees are handled in
/// constant call depth.
pub fn bounded_markup(document: &Html, max_depth: usize) -> String {
    let mut out = String::new();
    let mut stack = vec![(document.tree.root(), 0usize, false)];

    while let Some((node, depth, leaving)) = stack.pop() {
        match node.value() {
            Node::Element(element) if depth <= max_depth => {
                let name = element.name();
                if leaving {
                    if !VOID_TAGS.contains(&name) {
                        out.push_str("</");
                        out.push_str(name);
                        out.push('>');
                    }
                    continue;
                }

                out.push('<');
                out.push_str(name);
                for (attr, value) in element.attrs() {
                    out.push(' ');
                    out.push_str(attr);
                    out.push_str("=\"");
                    out.push_str(&html_escape::encode_double_quoted_attribute(value));
                    out.push('"');
                }
                out.push('>');

                stack.push((node, depth, true));
                for child in node.children().rev() {
                    stack.push((child, depth + 1, false));
                }
            }
            Node::Element(element) => {
                if NON_CONTENT_TAGS.contains(&element.name()) {
                    continue;
                }
                // Too deep: keep the words, drop the structure.
                out.push(' ');
                for child in node.children().rev() {
                    stack.push((child, depth + 1, false));
                }
            }
            Node::Document | Node::Fragment => {
                for child in node.children().rev() {
                    stack.push((child, depth, false));
                }
            }
            Node::Text(text) => out.push_str(&html_escape::encode_text(&**text)),
            _ => {}
        }
    }

    out
}

fn plain_text(document: &Html) -> String {
    document
        .root_element()
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strip trailing spaces on every line and squeeze blank-line runs
fn tidy(text: &str) -> String {
    let joined = text.lines().map(str::trim_end).collect::<Vec<_>>().join("\n");
    BLANK_RUNS.replace_all(&joined, "\n\n").trim().to_string()
}

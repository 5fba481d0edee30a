//! Search query validation and result normalization
//!
//! Search providers hand back loosely shaped records. This module maps them to
//! a stable `{title, url, description}` shape, keeping provider order, and
//! turns provider failures into a well-formed single-entry list.

use crate::error::{ArgumentError, MAX_SEARCH_LIMIT};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Default number of search results
pub const DEFAULT_SEARCH_LIMIT: usize = 3;

static RESULTS_CONTAINER: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("#links, div.results, div.result, .no-results").expect("static selector is valid")
});

static RESULT_BLOCK: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div.result:not(.result--ad)").expect("static selector is valid")
});

static RESULT_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.result__a").expect("static selector is valid"));

static RESULT_SNIPPET: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".result__snippet").expect("static selector is valid"));

/// A validated search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub phrase: String,
    pub limit: usize,
}

impl SearchQuery {
    pub fn new(phrase: impl Into<String>, limit: usize) -> Result<Self, ArgumentError> {
        let phrase = phrase.into();
        if phrase.trim().is_empty() {
            return Err(ArgumentError::EmptyPhrase);
        }
        if !(1..=MAX_SEARCH_LIMIT).contains(&limit) {
            return Err(ArgumentError::Limit(limit));
        }
        Ok(Self { phrase, limit })
    }

    /// Query text restricted to a single site
    pub fn scoped_to(&self, host: &str) -> String {
        format!("{} site:{host}", self.phrase)
    }
}

/// One search hit as returned to callers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub description: String,
}

impl SearchResult {
    /// Single-entry stand-in for a failed search
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            description: message.into(),
            ..Self::default()
        }
    }
}

/// Raw record from a search provider; any field may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawSearchRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

/// Map provider records to results, defaulting missing fields to `""`
pub fn normalize_results(records: Vec<RawSearchRecord>, limit: usize) -> Vec<SearchResult> {
    records
        .into_iter()
        .take(limit)
        .map(|record| SearchResult {
            title: record.title.unwrap_or_default(),
            url: record.href.unwrap_or_default(),
            description: record.body.unwrap_or_default(),
        })
        .collect()
}

/// Parse the DuckDuckGo HTML results page into raw records
///
/// Ads are skipped. Redirect links of the form `//duckduckgo.com/l/?uddg=...`
/// are unwrapped to the target location.
///
/// Returns `None` when the page has no results container at all, which is
/// what rate-limit and bot-challenge pages look like. A results page with no
/// hits yields `Some` of an empty list.
pub fn parse_duckduckgo_html(html: &str, max_results: usize) -> Option<Vec<RawSearchRecord>> {
    let document = Html::parse_document(html);

    document.select(&RESULTS_CONTAINER).next()?;

    let records = document
        .select(&RESULT_BLOCK)
        .map(|block| {
            let link = block.select(&RESULT_LINK).next();
            let snippet = block.select(&RESULT_SNIPPET).next();

            RawSearchRecord {
                title: link.map(|a| collapse_text(a.text())),
                href: link
                    .and_then(|a| a.value().attr("href"))
                    .map(resolve_result_href),
                body: snippet.map(|s| collapse_text(s.text())),
            }
        })
        .filter(|record| record.href.as_deref().is_some_and(|href| !href.is_empty()))
        .take(max_results)
        .collect();

    Some(records)
}

fn collapse_text<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Unwrap a DuckDuckGo redirect link to the location it points at
pub fn resolve_result_href(raw: &str) -> String {
    let raw = raw.trim();

    if let Some(pos) = raw.find("uddg=") {
        let encoded = &raw[pos + 5..];
        let encoded = encoded.split('&').next().unwrap_or_default();
        return match urlencoding::decode(encoded) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => encoded.to_string(),
        };
    }

    if let Some(rest) = raw.strip_prefix("//") {
        return format!("https://{rest}");
    }

    raw.to_string()
}

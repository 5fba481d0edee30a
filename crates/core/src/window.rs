//! Stateless character windows over normalized content
//!
//! A window is a bounded slice of a document plus the metadata a caller needs
//! to resume reading. No cursor is kept anywhere: the caller carries
//! `next_start_index` forward, so identical requests always produce identical
//! windows and disjoint ranges of one document can be read in parallel.
//!
//! All offsets count Unicode scalar values, not bytes.

use serde::Serialize;

/// A bounded slice of a document with position metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowedResult {
    pub source_location: String,
    pub total_length: usize,
    pub range_start: usize,
    pub range_end: usize,
    pub body: String,
    pub truncated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_start_index: Option<usize>,
}

/// Cut a window of at most `max_length` characters out of `content`
///
/// `start_index` past the end yields an empty, non-truncated window.
pub fn window(
    content: &str,
    start_index: usize,
    max_length: usize,
    source_location: &str,
) -> WindowedResult {
    let total_length = content.chars().count();
    let range_start = start_index.min(total_length);
    let range_end = range_start.saturating_add(max_length).min(total_length);

    let body = slice_content(content, range_start, range_end);

    let resume_at = start_index.saturating_add(max_length);
    let truncated = resume_at < total_length;

    WindowedResult {
        source_location: source_location.to_string(),
        total_length,
        range_start,
        range_end,
        body,
        truncated,
        next_start_index: truncated.then_some(resume_at),
    }
}

/// Extract content between two character offsets
pub fn slice_content(content: &str, start_offset: usize, end_offset: usize) -> String {
    content
        .chars()
        .skip(start_offset)
        .take(end_offset.saturating_sub(start_offset))
        .collect()
}

impl WindowedResult {
    /// Render the window as the text report handed back to callers
    pub fn report(&self) -> String {
        let mut result = format!("# OCI Documentation from {}\n\n", self.source_location);
        result.push_str(&format!(
            "**Total Length:** {} characters\n",
            self.total_length
        ));
        result.push_str(&format!(
            "**Showing:** Characters {} to {}\n\n",
            self.range_start, self.range_end
        ));
        result.push_str("---\n\n");
        result.push_str(&self.body);

        if let Some(next) = self.next_start_index {
            result.push_str(&format!(
                "\n\n---\n**Note:** Content truncated. To read more, call this function again with start_index={next}"
            ));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://docs.oracle.com/en-us/iaas/Content/home.htm";

    #[test]
    fn test_window_whole_document() {
        let result = window("Hello, World!", 0, 5000, URL);
        assert_eq!(result.total_length, 13);
        assert_eq!(result.range_start, 0);
        assert_eq!(result.range_end, 13);
        assert_eq!(result.body, "Hello, World!");
        assert!(!result.truncated);
        assert_eq!(result.next_start_index, None);
    }

    #[test]
    fn test_window_exact_fit_is_not_truncated() {
        let result = window("abcde", 0, 5, URL);
        assert_eq!(result.body, "abcde");
        assert!(!result.truncated);
    }

    #[test]
    fn test_window_middle() {
        let result = window("Hello, World!", 7, 5, URL);
        assert_eq!(result.body, "World");
        assert_eq!(result.range_start, 7);
        assert_eq!(result.range_end, 12);
        assert!(result.truncated);
        assert_eq!(result.next_start_index, Some(12));
    }

    #[test]
    fn test_window_start_past_end() {
        let result = window("short", 50, 10, URL);
        assert_eq!(result.range_start, 5);
        assert_eq!(result.range_end, 5);
        assert_eq!(result.body, "");
        assert!(!result.truncated);
        assert_eq!(result.next_start_index, None);
    }

    #[test]
    fn test_window_start_at_end() {
        let result = window("short", 5, 10, URL);
        assert_eq!(result.body, "");
        assert!(!result.truncated);
    }

    #[test]
    fn test_window_empty_content() {
        let result = window("", 0, 100, URL);
        assert_eq!(result.total_length, 0);
        assert_eq!(result.body, "");
        assert!(!result.truncated);
    }

    #[test]
    fn test_window_counts_characters_not_bytes() {
        let result = window("Hello 世界! café", 6, 2, URL);
        assert_eq!(result.total_length, 14);
        assert_eq!(result.body, "世界");
        assert_eq!(result.next_start_index, Some(8));
    }

    #[test]
    fn test_window_huge_max_length_does_not_overflow() {
        let result = window("abc", usize::MAX, usize::MAX, URL);
        assert_eq!(result.body, "");
        assert!(!result.truncated);
    }

    #[test]
    fn test_window_pages_through_twelve_thousand_chars() {
        let content: String = (0..12_000)
            .map(|i| char::from(b'a' + (i % 26) as u8))
            .collect();

        let first = window(&content, 0, 5000, URL);
        assert_eq!(first.body.chars().count(), 5000);
        assert!(first.truncated);
        assert_eq!(first.next_start_index, Some(5000));

        let second = window(&content, 5000, 5000, URL);
        assert_eq!(second.body.chars().count(), 5000);
        assert!(second.truncated);
        assert_eq!(second.next_start_index, Some(10_000));

        let third = window(&content, 10_000, 5000, URL);
        assert_eq!(third.body.chars().count(), 2000);
        assert!(!third.truncated);
        assert_eq!(third.next_start_index, None);

        let joined = format!("{}{}{}", first.body, second.body, third.body);
        assert_eq!(joined, content);
    }

    #[test]
    fn test_window_invariants_hold_across_offsets() {
        let content = "The quick brown fox jumps over the lazy dog. ¿Qué tal? 🚀";
        let total = content.chars().count();

        for start in 0..total + 3 {
            for max in 1..total + 3 {
                let result = window(content, start, max, URL);
                let body_len = result.body.chars().count();
                assert!(body_len <= max);
                assert_eq!(result.range_start, start.min(total));
                assert_eq!(result.range_end - result.range_start, body_len);
                assert_eq!(result.truncated, total > start + max);
                if result.truncated {
                    assert_eq!(result.next_start_index, Some(start + max));
                }
            }
        }
    }

    #[test]
    fn test_report_without_truncation() {
        let report = window("Body text", 0, 100, URL).report();
        assert_eq!(
            report,
            format!(
                "# OCI Documentation from {URL}\n\n**Total Length:** 9 characters\n**Showing:** Characters 0 to 9\n\n---\n\nBody text"
            )
        );
        assert!(!report.contains("Content truncated"));
    }

    #[test]
    fn test_report_with_truncation_note() {
        let report = window("0123456789", 2, 3, URL).report();
        assert!(report.contains("**Showing:** Characters 2 to 5\n"));
        assert!(report.contains("---\n\n234"));
        assert!(report.ends_with(
            "234\n\n---\n**Note:** Content truncated. To read more, call this function again with start_index=5"
        ));
    }

    #[test]
    fn test_report_is_deterministic() {
        let a = window("same content", 1, 4, URL).report();
        let b = window("same content", 1, 4, URL).report();
        assert_eq!(a, b);
    }

    #[test]
    fn test_slice_content_empty_range() {
        assert_eq!(slice_content("Hello", 5, 5), "");
        assert_eq!(slice_content("Hello", 4, 2), "");
    }
}

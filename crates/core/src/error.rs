//! Error types shared by the documentation tools
//!
//! The `Display` output of each variant is the exact message handed back to the
//! caller, so these strings are part of the tool contract.

use crate::policy::PolicyViolation;

/// Upper bound (exclusive) accepted for `max_length`
pub const MAX_LENGTH_LIMIT: usize = 1_000_000;

/// Largest number of search results a caller may request
pub const MAX_SEARCH_LIMIT: usize = 10;

/// Reasons a documentation page could not be turned into a report
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Error: {0}")]
    Policy(#[from] PolicyViolation),

    #[error("Failed to fetch {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Failed to fetch {url} - status code {status}")]
    Status { url: String, status: u16 },
}

/// Caller-supplied arguments outside their accepted range
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentError {
    #[error("max_length must be greater than 0 and less than {limit}, got {0}", limit = MAX_LENGTH_LIMIT)]
    MaxLength(usize),

    #[error("search_phrase must not be empty")]
    EmptyPhrase,

    #[error("limit must be between 1 and {max}, got {0}", max = MAX_SEARCH_LIMIT)]
    Limit(usize),
}

//! Pure half of reading a documentation page
//!
//! The shell crate performs the HTTP request; everything that happens to the
//! bytes afterwards lives here so it can be tested with fixture strings.

use crate::classify::{classify, ContentKind};
use crate::error::{ArgumentError, MAX_LENGTH_LIMIT};
use crate::html::normalize_html;
use crate::window::{window, WindowedResult};

/// Default number of characters returned per window
pub const DEFAULT_MAX_LENGTH: usize = 5000;

/// A validated request to read one documentation page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub location: String,
    pub max_length: usize,
    pub start_index: usize,
}

impl FetchRequest {
    pub fn new(
        location: impl Into<String>,
        max_length: usize,
        start_index: usize,
    ) -> Result<Self, ArgumentError> {
        if max_length == 0 || max_length >= MAX_LENGTH_LIMIT {
            return Err(ArgumentError::MaxLength(max_length));
        }

        Ok(Self {
            location: location.into(),
            max_length,
            start_index,
        })
    }
}

/// Body and advertised content type of an HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPayload {
    pub body: String,
    pub declared_content_type: String,
}

impl RawPayload {
    /// Build a payload from raw response bytes, always decoding as UTF-8
    ///
    /// Invalid sequences become U+FFFD so character counts stay deterministic
    /// whatever charset the server claims.
    pub fn from_bytes(bytes: &[u8], declared_content_type: impl Into<String>) -> Self {
        Self {
            body: String::from_utf8_lossy(bytes).into_owned(),
            declared_content_type: declared_content_type.into(),
        }
    }
}

/// Turn a payload into readable text: Markdown for HTML, verbatim otherwise
pub fn normalize_payload(payload: &RawPayload) -> String {
    match classify(&payload.body, &payload.declared_content_type) {
        ContentKind::Html => normalize_html(&payload.body),
        ContentKind::Plain => payload.body.clone(),
    }
}

/// Run the whole post-fetch pipeline and return the requested window
pub fn render_page(request: &FetchRequest, payload: &RawPayload) -> WindowedResult {
    let content = normalize_payload(payload);
    window(
        &content,
        request.start_index,
        request.max_length,
        &request.location,
    )
}

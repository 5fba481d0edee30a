//! Core library for ocidocs
//!
//! This crate implements the **Functional Core** of the ocidocs application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`ocidocs_core`** (this crate): Pure transformation functions with zero I/O
//! - **`ocidocs`**: HTTP requests, search provider calls, CLI and MCP transports
//!
//! Everything here is deterministic: the same payload and arguments always
//! produce the same output, so the modules are tested with fixture strings
//! and no mocking.
//!
//! # Module Organization
//!
//! - [`classify`]: HTML versus plain-text detection for fetched payloads
//! - [`html`]: HTML to Markdown normalization with ATX headings
//! - [`window`]: Stateless character windows and the paginated text report
//! - [`policy`]: Which locations may be fetched at all
//! - [`fetch`]: Request validation and the post-fetch pipeline
//! - [`search`]: Search query validation, provider parsing and result normalization
//! - [`error`]: Caller-facing error types
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use ocidocs_core::fetch::{render_page, FetchRequest, RawPayload};
//!
//! let request = FetchRequest::new("https://docs.oracle.com/a.htm", 5000, 0)?;
//! let payload = RawPayload::from_bytes(b"<h1>Title</h1>", "text/html");
//!
//! let report = render_page(&request, &payload).report();
//! assert!(report.contains("# Title"));
//! ```

pub mod classify;
pub mod error;
pub mod fetch;
pub mod html;
pub mod policy;
pub mod search;
pub mod window;

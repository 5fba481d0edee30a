//! Documentation search and page reading
//!
//! The orchestration lives here; every transformation it relies on comes from
//! `ocidocs_core`.

pub mod read;
pub mod search;

use crate::prelude::*;
use ocidocs_core::policy::DocsSitePolicy;
use std::time::Duration;

/// User-Agent sent when none is configured
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Redirect hops followed before a request is considered failed
const MAX_REDIRECTS: usize = 10;

/// Build the HTTP client used for page reads and searches
pub fn http_client(global: &crate::Global) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(global.user_agent.as_str())
        .timeout(Duration::from_secs(global.timeout))
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()
        .map_err(|e| Error::HttpClient(e.to_string()))?;

    Ok(client)
}

/// Location policy for the configured documentation host
pub fn site_policy(global: &crate::Global) -> DocsSitePolicy {
    DocsSitePolicy::for_host(global.docs_host.clone())
}

/// Serve `router` on an ephemeral local port and return its base URL
#[cfg(test)]
pub(crate) async fn serve_for_tests(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });
    format!("http://{addr}")
}

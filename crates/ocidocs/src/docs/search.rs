use crate::prelude::{println, *};
use colored::Colorize;
use ocidocs_core::search::{
    normalize_results, parse_duckduckgo_html, RawSearchRecord, SearchQuery, SearchResult,
    DEFAULT_SEARCH_LIMIT,
};
use std::future::Future;

const DDG_HTML_URL: &str = "https://html.duckduckgo.com/html/";

#[derive(Debug, clap::Args, Clone)]
pub struct SearchOptions {
    /// Search phrase to use
    #[clap(env = "OCIDOCS_SEARCH_PHRASE")]
    pub search_phrase: String,

    /// Maximum number of results to return (1-10)
    #[arg(short, long, env = "OCIDOCS_LIMIT", default_value_t = DEFAULT_SEARCH_LIMIT)]
    pub limit: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: SearchOptions, global: crate::Global) -> Result<()> {
    let query = SearchQuery::new(options.search_phrase, options.limit)
        .map_err(|e| Error::InvalidArguments(e.to_string()))?;

    let provider = DuckDuckGoProvider::new(&global)?;
    let results = search_documentation(&provider, &global.docs_host, &query).await;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        println!("Found {} result(s):\n", results.len().to_string().yellow());

        if results.is_empty() {
            println!("No results found.");
            return Ok(());
        }

        results_table(&results).printstd();
    }

    Ok(())
}

/// Web search backend returning raw result records
pub trait SearchProvider {
    fn text(
        &self,
        query: &str,
        max_results: usize,
    ) -> impl Future<Output = Result<Vec<RawSearchRecord>>> + Send;
}

/// Search provider backed by the DuckDuckGo HTML endpoint (no API key required)
pub struct DuckDuckGoProvider {
    client: reqwest::Client,
    endpoint: String,
}

impl DuckDuckGoProvider {
    pub fn new(global: &crate::Global) -> Result<Self> {
        Ok(Self::with_endpoint(
            super::http_client(global)?,
            DDG_HTML_URL,
        ))
    }

    pub fn with_endpoint(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

impl SearchProvider for DuckDuckGoProvider {
    async fn text(&self, query: &str, max_results: usize) -> Result<Vec<RawSearchRecord>> {
        let url = format!("{}?q={}", self.endpoint, urlencoding::encode(query));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| eyre!("DuckDuckGo request failed: {e}"))?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(eyre!("DuckDuckGo returned status {}", response.status()));
        }

        let html = response
            .text()
            .await
            .map_err(|e| eyre!("Failed to read DuckDuckGo response: {e}"))?;

        parse_duckduckgo_html(&html, max_results).ok_or_else(|| {
            eyre!("DuckDuckGo returned a page without results (rate limited or challenged)")
        })
    }
}

/// Search the documentation site and return normalized results
///
/// Provider failures are returned as a single result carrying the error text,
/// so callers always get a list back.
pub async fn search_documentation<P: SearchProvider>(
    provider: &P,
    host: &str,
    query: &SearchQuery,
) -> Vec<SearchResult> {
    info!("Searching OCI documentation for: {}", query.phrase);

    let records = match provider.text(&query.scoped_to(host), query.limit).await {
        Ok(records) => records,
        Err(e) => {
            let message = format!("Error searching OCI docs: {e}");
            error!("{message}");
            return vec![SearchResult::failure(message)];
        }
    };

    let results = normalize_results(records, query.limit);
    for result in &results {
        debug!("{}", result.url);
    }
    debug!(
        "Found {} search results for: {}",
        results.len(),
        query.phrase
    );

    results
}

fn results_table(results: &[SearchResult]) -> prettytable::Table {
    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row!["#", "Title", "URL", "Description"]);

    for (idx, result) in results.iter().enumerate() {
        table.add_row(prettytable::row![
            (idx + 1),
            &result.title,
            &result.url,
            &result.description
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::response::Html;
    use axum::routing::get;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct FakeProvider {
        response: std::result::Result<Vec<RawSearchRecord>, String>,
        queries: Mutex<Vec<(String, usize)>>,
    }

    impl FakeProvider {
        fn ok(records: Vec<RawSearchRecord>) -> Self {
            Self {
                response: Ok(records),
                queries: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                response: Err(message.to_string()),
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    impl SearchProvider for FakeProvider {
        async fn text(&self, query: &str, max_results: usize) -> Result<Vec<RawSearchRecord>> {
            self.queries
                .lock()
                .unwrap()
                .push((query.to_string(), max_results));
            self.response.clone().map_err(|message| eyre!(message))
        }
    }

    fn record(title: &str, href: &str, body: &str) -> RawSearchRecord {
        RawSearchRecord {
            title: Some(title.to_string()),
            href: Some(href.to_string()),
            body: Some(body.to_string()),
        }
    }

    #[tokio::test]
    async fn test_query_is_scoped_to_docs_host() {
        let provider = FakeProvider::ok(Vec::new());
        let query = SearchQuery::new("object storage lifecycle", 5).unwrap();

        search_documentation(&provider, "docs.oracle.com", &query).await;

        let queries = provider.queries.lock().unwrap();
        assert_eq!(
            *queries,
            vec![(
                "object storage lifecycle site:docs.oracle.com".to_string(),
                5
            )]
        );
    }

    #[tokio::test]
    async fn test_provider_failure_becomes_single_result() {
        let provider = FakeProvider::failing("rate limited");
        let query = SearchQuery::new("x", 3).unwrap();

        let results = search_documentation(&provider, "docs.oracle.com", &query).await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "");
        assert_eq!(results[0].url, "");
        assert_eq!(
            results[0].description,
            "Error searching OCI docs: rate limited"
        );
    }

    #[tokio::test]
    async fn test_results_keep_provider_order_and_limit() {
        let provider = FakeProvider::ok(vec![
            record("IAM", "https://docs.oracle.com/iam.htm", "Identity"),
            record("VCN", "https://docs.oracle.com/vcn.htm", "Networking"),
            record("OKE", "https://docs.oracle.com/oke.htm", "Kubernetes"),
            record("ADB", "https://docs.oracle.com/adb.htm", "Database"),
        ]);
        let query = SearchQuery::new("services", 3).unwrap();

        let results = search_documentation(&provider, "docs.oracle.com", &query).await;

        let titles: Vec<_> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["IAM", "VCN", "OKE"]);
        assert_eq!(results[1].url, "https://docs.oracle.com/vcn.htm");
        assert_eq!(results[1].description, "Networking");
    }

    #[tokio::test]
    async fn test_missing_fields_default_to_empty() {
        let provider = FakeProvider::ok(vec![RawSearchRecord {
            href: Some("https://docs.oracle.com/a.htm".to_string()),
            ..RawSearchRecord::default()
        }]);
        let query = SearchQuery::new("a", 3).unwrap();

        let results = search_documentation(&provider, "docs.oracle.com", &query).await;

        assert_eq!(
            results,
            vec![SearchResult {
                title: String::new(),
                url: "https://docs.oracle.com/a.htm".to_string(),
                description: String::new(),
            }]
        );
    }

    const RESULTS_PAGE: &str = r#"<html><body><div id="links" class="results">
<div class="result web-result"><h2 class="result__title"><a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fdocs.oracle.com%2Fiam.htm&amp;rut=1">IAM <b>Overview</b></a></h2>
<a class="result__snippet">Identity and Access Management</a></div>
</div></body></html>"#;

    const CHALLENGE_PAGE: &str = r#"<html><body><form id="challenge-form"><div class="anomaly-modal__title">Unfortunately, bots use DuckDuckGo too.</div></form></body></html>"#;

    async fn duckduckgo_stub(status: StatusCode, page: &'static str) -> DuckDuckGoProvider {
        let router = axum::Router::new().route(
            "/html/",
            get(move |Query(params): Query<HashMap<String, String>>| async move {
                assert!(params.contains_key("q"));
                (status, Html(page))
            }),
        );
        let base = crate::docs::serve_for_tests(router).await;
        DuckDuckGoProvider::with_endpoint(reqwest::Client::new(), format!("{base}/html/"))
    }

    #[tokio::test]
    async fn test_duckduckgo_provider_parses_results_page() {
        let provider = duckduckgo_stub(StatusCode::OK, RESULTS_PAGE).await;
        let query = SearchQuery::new("iam", 3).unwrap();

        let results = search_documentation(&provider, "docs.oracle.com", &query).await;

        assert_eq!(
            results,
            vec![SearchResult {
                title: "IAM Overview".to_string(),
                url: "https://docs.oracle.com/iam.htm".to_string(),
                description: "Identity and Access Management".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_duckduckgo_provider_rejects_accepted_status() {
        let provider = duckduckgo_stub(StatusCode::ACCEPTED, CHALLENGE_PAGE).await;

        let err = provider.text("iam site:docs.oracle.com", 3).await.unwrap_err();
        assert!(err.to_string().contains("202"));
    }

    #[tokio::test]
    async fn test_duckduckgo_challenge_page_is_reported_as_failure() {
        let provider = duckduckgo_stub(StatusCode::OK, CHALLENGE_PAGE).await;
        let query = SearchQuery::new("iam", 3).unwrap();

        let results = search_documentation(&provider, "docs.oracle.com", &query).await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].url, "");
        assert!(results[0]
            .description
            .starts_with("Error searching OCI docs: DuckDuckGo returned a page without results"));
    }

    #[test]
    fn test_results_table_rows() {
        let results = vec![
            SearchResult {
                title: "IAM".to_string(),
                url: "https://docs.oracle.com/iam.htm".to_string(),
                description: "Identity".to_string(),
            },
            SearchResult::failure("Error searching OCI docs: boom"),
        ];

        let table = results_table(&results);
        assert_eq!(table.len(), 3);

        let cell = |row: usize, col: usize| {
            table
                .get_row(row)
                .and_then(|r| r.get_cell(col))
                .map(|c| c.get_content())
                .unwrap()
        };
        assert_eq!(cell(0, 1), "Title");
        assert_eq!(cell(1, 0), "1");
        assert_eq!(cell(1, 2), "https://docs.oracle.com/iam.htm");
        assert_eq!(cell(2, 1), "");
        assert_eq!(cell(2, 3), "Error searching OCI docs: boom");
    }
}

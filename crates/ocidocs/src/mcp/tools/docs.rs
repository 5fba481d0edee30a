use super::{CallToolResult, JsonRpcError};
use crate::docs::read::{read_documentation, HttpPageSource};
use crate::docs::search::{search_documentation, DuckDuckGoProvider};
use crate::prelude::eprintln;
use ocidocs_core::fetch::{FetchRequest, DEFAULT_MAX_LENGTH};
use ocidocs_core::search::{SearchQuery, DEFAULT_SEARCH_LIMIT};
use serde::Deserialize;

fn parse_arguments<T: for<'de> Deserialize<'de>>(
    arguments: Option<serde_json::Value>,
) -> Result<T, JsonRpcError> {
    serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid arguments: {e}")))
}

pub async fn handle_search_documentation(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct SearchArgs {
        search_phrase: String,
        #[serde(default)]
        limit: Option<usize>,
    }

    let args: SearchArgs = parse_arguments(arguments)?;

    let query = SearchQuery::new(args.search_phrase, args.limit.unwrap_or(DEFAULT_SEARCH_LIMIT))
        .map_err(|e| JsonRpcError::invalid_params(e.to_string()))?;

    if global.verbose {
        eprintln!("search_documentation: {} (limit {})", query.phrase, query.limit);
    }

    let provider =
        DuckDuckGoProvider::new(global).map_err(|e| JsonRpcError::internal(e.to_string()))?;
    let results = search_documentation(&provider, &global.docs_host, &query).await;

    let json_string = serde_json::to_string_pretty(&results)
        .map_err(|e| JsonRpcError::internal(format!("Serialization error: {e}")))?;

    CallToolResult::text(json_string)
}

pub async fn handle_read_documentation(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct ReadArgs {
        url: String,
        #[serde(default)]
        max_length: Option<usize>,
        #[serde(default)]
        start_index: Option<usize>,
    }

    let args: ReadArgs = parse_arguments(arguments)?;

    let request = FetchRequest::new(
        args.url,
        args.max_length.unwrap_or(DEFAULT_MAX_LENGTH),
        args.start_index.unwrap_or(0),
    )
    .map_err(|e| JsonRpcError::invalid_params(e.to_string()))?;

    if global.verbose {
        eprintln!(
            "read_documentation: {} (start {}, max {})",
            request.location, request.start_index, request.max_length
        );
    }

    let source = HttpPageSource::new(global).map_err(|e| JsonRpcError::internal(e.to_string()))?;
    let policy = crate::docs::site_policy(global);

    let report = read_documentation(&source, &policy, &request).await;

    CallToolResult::text(report)
}

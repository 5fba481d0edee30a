use crate::prelude::{eprintln, *};
use axum::{
    extract::State,
    http::StatusCode,
    response::sse::{Event, Sse},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use futures::stream::{self, Stream};
use std::convert::Infallible;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub async fn run_http(options: super::cli::HttpOptions, global: crate::Global) -> Result<()> {
    let addr = format!("{}:{}", options.host, options.port);
    info!("Starting OCI documentation MCP server on http://{addr}/mcp");

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app_router = router(global.clone()).layer(cors);

    if global.verbose {
        eprintln!("MCP server listening on http://{addr}");
        eprintln!("Message endpoint: http://{addr}/mcp");
        eprintln!("SSE endpoint: http://{addr}/sse");
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    axum::serve(listener, app_router)
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

fn router(global: crate::Global) -> Router {
    Router::new()
        .route("/mcp", post(message_handler))
        .route("/sse", get(sse_handler))
        .with_state(Arc::new(global))
}

async fn sse_handler(
    State(_global): State<Arc<crate::Global>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = stream::once(async { Ok(Event::default().data("MCP endpoint ready")) });
    Sse::new(stream)
}

/// Takes the raw body so malformed JSON still gets a JSON-RPC parse error
async fn message_handler(State(global): State<Arc<crate::Global>>, body: String) -> Response {
    match super::handle_request(&body, &global).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use clap::Parser;
    use tower::ServiceExt;

    fn app() -> Router {
        router(crate::App::parse_from(["ocidocs", "mcp", "http"]).global)
    }

    async fn post_body(body: &str) -> Response {
        app()
            .oneshot(
                Request::post("/mcp")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn json_of(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_post_tools_list() {
        let response = post_body(r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_of(response).await;
        assert_eq!(json["id"], 1);
        assert_eq!(json["result"]["tools"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_post_notification_is_accepted() {
        let response =
            post_body(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#).await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn test_post_malformed_body() {
        let response = post_body("not json").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_of(response).await["error"]["code"], -32700);
    }
}

use crate::prelude::{println, *};
use ocidocs_core::error::FetchError;
use ocidocs_core::fetch::{render_page, FetchRequest, RawPayload, DEFAULT_MAX_LENGTH};
use ocidocs_core::policy::LocationPolicy;
use ocidocs_core::window::WindowedResult;
use std::future::Future;

#[derive(Debug, clap::Args, Clone)]
pub struct ReadOptions {
    /// URL of the OCI documentation page to read
    #[clap(env = "OCIDOCS_URL")]
    pub url: String,

    /// Maximum number of characters to return
    #[arg(short, long, env = "OCIDOCS_MAX_LENGTH", default_value_t = DEFAULT_MAX_LENGTH)]
    pub max_length: usize,

    /// Starting character index for content retrieval
    #[arg(short, long, default_value_t = 0)]
    pub start_index: usize,
}

pub async fn run(options: ReadOptions, global: crate::Global) -> Result<()> {
    let request = FetchRequest::new(options.url, options.max_length, options.start_index)
        .map_err(|e| Error::InvalidArguments(e.to_string()))?;

    let source = HttpPageSource::new(&global)?;
    let policy = super::site_policy(&global);

    let report = read_documentation(&source, &policy, &request).await;
    println!("{report}");

    Ok(())
}

/// Where the bytes of a documentation page come from
pub trait PageSource {
    fn get(&self, url: &str) -> impl Future<Output = Result<RawPayload, FetchError>> + Send;
}

/// Page source backed by a reqwest client
///
/// Follows redirects, sends the configured User-Agent and gives up after the
/// configured timeout.
pub struct HttpPageSource {
    client: reqwest::Client,
}

impl HttpPageSource {
    pub fn new(global: &crate::Global) -> Result<Self> {
        Ok(Self {
            client: super::http_client(global)?,
        })
    }
}

impl PageSource for HttpPageSource {
    async fn get(&self, url: &str) -> Result<RawPayload, FetchError> {
        let transport_error = |e: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(transport_error)?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let bytes = response.bytes().await.map_err(transport_error)?;

        Ok(RawPayload::from_bytes(&bytes, content_type))
    }
}

/// Fetch a documentation page and return one window of it as a text report
///
/// Failures come back as their message instead of an error so the caller
/// always receives a string.
pub async fn read_documentation<S: PageSource>(
    source: &S,
    policy: &dyn LocationPolicy,
    request: &FetchRequest,
) -> String {
    match fetch_window(source, policy, request).await {
        Ok(result) => {
            if let Some(next) = result.next_start_index {
                debug!(
                    "Content truncated at {} of {} characters",
                    next, result.total_length
                );
            }
            result.report()
        }
        Err(err) => {
            error!("{err}");
            err.to_string()
        }
    }
}

async fn fetch_window<S: PageSource>(
    source: &S,
    policy: &dyn LocationPolicy,
    request: &FetchRequest,
) -> Result<WindowedResult, FetchError> {
    policy.check(&request.location).inspect_err(|violation| {
        debug!("Invalid URL: {}. {violation}", request.location);
    })?;

    debug!("Fetching documentation from {}", request.location);
    let payload = source.get(&request.location).await?;

    Ok(render_page(request, &payload))
}

use crate::prelude::*;
use clap::Parser;

mod docs;
mod error;
mod mcp;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Search and read Oracle Cloud Infrastructure documentation from the terminal or over MCP"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "OCIDOCS_VERBOSE", global = true, default_value = "false")]
    verbose: bool,

    /// Documentation host that reads and searches are restricted to
    #[clap(
        long,
        env = "OCIDOCS_HOST",
        global = true,
        default_value = ocidocs_core::policy::DEFAULT_DOCS_HOST
    )]
    docs_host: String,

    /// HTTP timeout in seconds
    #[clap(long, env = "OCIDOCS_TIMEOUT", global = true, default_value = "30")]
    timeout: u64,

    /// User-Agent header sent with every request
    #[clap(
        long,
        env = "OCIDOCS_USER_AGENT",
        global = true,
        default_value = crate::docs::DEFAULT_USER_AGENT
    )]
    user_agent: String,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Search OCI documentation for pages matching a phrase
    Search(crate::docs::search::SearchOptions),

    /// Read an OCI documentation page as paginated Markdown
    Read(crate::docs::read::ReadOptions),

    /// Model Context Protocol server
    MCP(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Search(options) => crate::docs::search::run(options, app.global).await,
        SubCommands::Read(options) => crate::docs::read::run(options, app.global).await,
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}

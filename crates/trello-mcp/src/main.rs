use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rmcp::transport::stdio;
use rmcp::ServiceExt;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use trello_client::TrelloClient;
use trello_core::{ActiveSelection, TrelloConfig};
use trello_mcp::context::McpContext;
use trello_mcp::render::OutputFormat;
use trello_mcp::TrelloMcpServer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Transport {
    Stdio,
    Http,
}

/// Trello tools over the Model Context Protocol.
///
/// Credentials and defaults come from TRELLO_API_KEY, TRELLO_TOKEN,
/// TRELLO_BOARD_ID, TRELLO_WORKSPACE_ID and MCP_DEBUG.
#[derive(Debug, Parser)]
#[command(name = "trello-mcp", version, about)]
struct Args {
    /// How the MCP client connects
    #[arg(long, value_enum, env = "MCP_TRANSPORT", default_value_t = Transport::Stdio)]
    transport: Transport,

    /// Bind address for the HTTP transport
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port for the HTTP transport
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,

    /// Tool output: raw JSON or human-readable summaries
    #[arg(long, value_enum, env = "TRELLO_OUTPUT_FORMAT", default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

fn init_tracing(debug: bool) {
    let default_filter = if debug { "debug" } else { "info,rmcp=warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = TrelloConfig::from_env();
    init_tracing(config.debug);

    let client = TrelloClient::from_config(&config).context("Refusing to start")?;
    let selection = ActiveSelection::new(config.board_id.clone(), config.workspace_id.clone());
    let context = McpContext::new(Arc::new(client), selection)
        .with_environment(config.effective_environment());
    let server = TrelloMcpServer::new(context).with_format(args.format);

    tracing::info!(
        "Starting Trello MCP server: transport={:?} format={:?} debug={}",
        args.transport,
        args.format,
        config.debug
    );

    match args.transport {
        Transport::Stdio => {
            let service = server.serve(stdio()).await?;
            tracing::info!("Trello MCP server started successfully");
            service.waiting().await?;
        }
        Transport::Http => {
            trello_mcp::http::serve(server, &args.host, args.port).await?;
        }
    }

    Ok(())
}

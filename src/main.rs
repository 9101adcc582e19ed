//! secforge MCP server - main entry point.
//!
//! `serve` (default) speaks MCP over stdio. `list` prints the catalog and
//! `call` synthesizes one command from the shell.

use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

use secforge_core::mcp::McpServer;
use secforge_core::tools::Dispatcher;
use secforge_core::Config;

#[derive(Parser, Debug)]
#[command(name = "secforge-mcp", version, about = "Security tool command synthesis over MCP")]
struct Cli {
    /// JSON configuration file
    #[arg(long, env = "SECFORGE_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve MCP over stdin/stdout
    Serve,
    /// Print every registered tool
    List,
    /// Call one tool with JSON arguments
    Call {
        tool: String,
        #[arg(default_value = "{}")]
        args: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if cli.json_logs {
        config.observability.json_logs = true;
    }
    secforge_core::observability::init_tracing(&config.observability);

    let dispatcher = Arc::new(Dispatcher::from_config(&config)?);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let server = McpServer::new(dispatcher, config.server.clone());
            let cancel = server.cancel_token();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    cancel.cancel();
                }
            });
            server.serve_stdio().await?;
        }
        Command::List => {
            for entry in dispatcher.catalog().list_entries() {
                println!("{}", entry.to_signature_line());
            }
        }
        Command::Call { tool, args } => {
            let args: Value = serde_json::from_str(&args)?;
            let response = dispatcher.call(&tool, &args).await;
            println!("{}", response.joined_text());
            if response.is_error {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

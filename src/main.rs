mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod render;
mod services;
mod workflow;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cmd::board::{self, BoardCommandArgs};
use crate::cmd::config::{self as config_cmd, ConfigCommand};
use crate::config::{AppConfig, ConfigOverrides};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::ticket_api::TicketApiClient;
use crate::render::OutputFormat;

const LOG_ENV: &str = "KANBAN_LOG";

#[derive(Parser)]
#[command(name = "kanban", author, version, about = "Kanban board for a remote ticket list")]
struct Cli {
    #[command(flatten)]
    selection: SelectionArgs,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the tickets and render them as columns.
    Board(BoardArgs),
    /// Inspect the resolved configuration.
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args)]
struct SelectionArgs {
    /// Ticket API endpoint (overrides KANBAN_API_URL).
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Grouping dimension: status, user, or priority.
    #[arg(short, long, global = true)]
    group_by: Option<String>,
    /// Sort dimension inside each column: priority or title.
    #[arg(short, long, global = true)]
    sort_by: Option<String>,
    /// Request timeout in seconds; no timeout when omitted.
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
}

#[derive(Args, Default)]
struct BoardArgs {
    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Keep the board open and accept `group`/`sort` commands on stdin.
    #[arg(short, long)]
    interactive: bool,
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(ConfigOverrides {
        api_url: cli.selection.api_url,
        group_by: cli.selection.group_by,
        sort_by: cli.selection.sort_by,
        timeout_secs: cli.selection.timeout_secs,
    })?;

    match cli.command.unwrap_or(Commands::Board(BoardArgs::default())) {
        Commands::Config { command } => config_cmd::run(command, &config),
        Commands::Board(args) => run_board(config, args).await,
    }
}

async fn run_board(config: AppConfig, args: BoardArgs) -> AppResult<()> {
    let client = TicketApiClient::new(config.api_url.clone(), config.timeout)?;
    debug!(
        url = client.api_url(),
        group_by = config.group_by.as_str(),
        sort_by = config.sort_by.as_str(),
        "starting board"
    );

    let context = AppContext::new(config, Arc::new(client));

    board::run(
        &context,
        BoardCommandArgs {
            format: args.format,
            interactive: args.interactive,
        },
    )
    .await
}

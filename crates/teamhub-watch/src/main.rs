//! TeamHub watch - mirrors one team's caches through the event stream
//!
//! `watch` keeps a live connection and applies every pushed event to
//! in-memory stores. `filter` evaluates a smart folder against a document
//! dump without touching the network.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "teamhub-watch", version, about)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Clone, Debug)]
enum Command {
    /// Connect to the team event stream and keep the caches in sync
    Watch {
        /// TOML configuration file; the environment is used when absent
        #[arg(long)]
        config: Option<PathBuf>,
        /// Team to follow
        #[arg(long, env = "TEAMHUB_TEAM_ID")]
        team: Option<String>,
        /// Bearer token for the API and the stream
        #[arg(long, env = "TEAMHUB_ACCESS_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
    /// Print the ids of the documents a smart folder selects
    Filter {
        /// Smart folder JSON
        #[arg(long)]
        smart_folder: PathBuf,
        /// JSON array of documents
        #[arg(long)]
        docs: PathBuf,
        /// Evaluate as of this RFC 3339 instant instead of now
        #[arg(long)]
        at: Option<String>,
    },
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "teamhub=info,teamhub_watch=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match cli.command {
        Command::Watch {
            config,
            team,
            token,
        } => {
            let config = config::load(config.as_deref(), team, token)?;
            commands::watch::run(config).await
        }
        Command::Filter {
            smart_folder,
            docs,
            at,
        } => commands::filter::run(&smart_folder, &docs, at.as_deref()),
    }
}

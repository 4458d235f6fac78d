use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use jobwatch::{cli, config, logging};

#[derive(Parser)]
#[command(name = "jobwatch")]
#[command(about = "Start a backend job and watch its progress", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a job for a subject record and monitor it until it finishes
    Watch(WatchArgs),
    /// Print the timeline of all currently visible executions
    Status(StatusArgs),
}

#[derive(Args, Serialize)]
struct WatchArgs {
    /// Subject record the job runs for
    #[serde(skip)]
    subject_id: String,

    /// Print log output instead of the interactive view
    #[serde(skip)]
    #[arg(long)]
    plain: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    rpc_addr: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    simulation: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    verbose: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    json_logs: Option<bool>,
}

#[derive(Args, Serialize)]
struct StatusArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    rpc_addr: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    simulation: Option<bool>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.command {
        Commands::Watch(args) => config::AppConfig::new(Some(args))?,
        Commands::Status(args) => config::AppConfig::new(Some(args))?,
    };

    logging::init(logging::LogConfig {
        json: config.json_logs,
        verbose: config.verbose,
    });

    match &cli.command {
        Commands::Watch(args) => cli::watch(&config, &args.subject_id, args.plain)
            .await
            .context("Failed to watch job")?,
        Commands::Status(_) => cli::status(&config)
            .await
            .context("Failed to fetch job status")?,
    }

    Ok(())
}

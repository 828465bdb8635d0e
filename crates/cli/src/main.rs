use clap::{Parser, Subcommand};

use cot_cli::commands::{self, AnalyzeArgs, FetchArgs, RunArgs};

#[derive(Parser)]
#[command(name = "cot")]
#[command(about = "Commitments-of-traders positioning and sentiment analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download report pages and write the extracted records to CSV
    Fetch(FetchArgs),
    /// Derive positioning features from a records CSV
    Analyze(AnalyzeArgs),
    /// Fetch and analyze in one pass
    Run(RunArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries the rendered table, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Fetch(args) => commands::run_fetch(args).await?,
        Commands::Analyze(args) => commands::run_analyze(args)?,
        Commands::Run(args) => commands::run_pipeline(args).await?,
    }

    Ok(())
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hedgeflow::agents::claude_cli::check_cli_available;
use hedgeflow::models::{HedgeflowConfig, ResearchDepth, WorkflowMode};
use hedgeflow::render::{render, write_output, OutputFormat};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "hedgeflow",
    about = "Unified trading workflow: signal generation and market research"
)]
struct Cli {
    /// Ticker symbols to analyze (e.g. AAPL MSFT NVDA)
    #[arg(short, long, num_args = 1.., required = true)]
    tickers: Vec<String>,

    /// Workflow mode: signal, research, pre-research, post-research, full
    #[arg(short, long)]
    mode: Option<WorkflowMode>,

    /// Research depth: quick, standard, deep
    #[arg(short, long)]
    depth: Option<ResearchDepth>,

    /// Analysts forwarded to the signal generator
    #[arg(short, long, num_args = 1..)]
    analysts: Option<Vec<String>>,

    /// Model used by both collaborators, overriding the config file
    #[arg(long)]
    model: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Console)]
    output: OutputFormat,

    /// Write output to this file instead of stdout
    #[arg(long)]
    output_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of symbols processed concurrently
    #[arg(long)]
    concurrency: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => hedgeflow::load_config(path)?,
        None => HedgeflowConfig::default(),
    };
    config.apply_overrides(cli.model.as_deref(), cli.concurrency);

    let orchestrator = hedgeflow::build_orchestrator(&config);
    let mode = cli.mode.unwrap_or(config.workflow.default_mode);

    if orchestrator.requires_claude_cli(mode) && !check_cli_available().await {
        anyhow::bail!("claude CLI not found on PATH; install it or use the placeholder signal backend");
    }

    let results = hedgeflow::run(
        &orchestrator,
        &cli.tickers,
        Some(mode),
        cli.analysts.as_deref(),
        cli.depth,
    )
    .await
    .context("Workflow failed")?;

    let output = render(&results, cli.output)?;
    match &cli.output_file {
        Some(path) => {
            write_output(path, &output)?;
            info!(path = %path.display(), "Results written");
        }
        None => println!("{output}"),
    }

    Ok(())
}

mod analyze;
mod dates;
mod ping;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::dates::{parse_end, parse_month, parse_start, YearMonth};

#[derive(Debug, Parser)]
#[command(name = "chanscope")]
#[command(about = "Farcaster channel activity reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect a channel's casts for a date window and write Markdown + JSON reports
    Analyze(AnalyzeArgs),
    /// Check the API key by fetching the latest casts from a channel
    Ping {
        /// Channel id (e.g., celo)
        #[arg(long, default_value = "celo")]
        channel: String,
    },
}

#[derive(Debug, Args)]
struct AnalyzeArgs {
    /// Channel id (e.g., celo)
    #[arg(long)]
    channel: String,
    /// Window start, YYYY-MM-DD (00:00:00 UTC) or RFC 3339
    #[arg(
        long,
        value_parser = parse_start,
        required_unless_present = "month",
        conflicts_with = "month"
    )]
    start: Option<DateTime<Utc>>,
    /// Window end, YYYY-MM-DD (23:59:59 UTC) or RFC 3339
    #[arg(
        long,
        value_parser = parse_end,
        required_unless_present = "month",
        conflicts_with = "month"
    )]
    end: Option<DateTime<Utc>>,
    /// Analyze a whole UTC calendar month instead (YYYY-MM)
    #[arg(long, value_parser = parse_month)]
    month: Option<YearMonth>,
    /// Number of contributors given a full report section
    #[arg(long, default_value_t = chanscope_report::DEFAULT_TOP_N)]
    top: usize,
    /// Directory for the report files (defaults to CHANSCOPE_OUTPUT_DIR)
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Base file name for the report files, without extension
    #[arg(long)]
    name: Option<String>,
    /// Drop casts with a repeated hash before aggregating
    #[arg(long)]
    dedupe: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = chanscope_core::load_app_config_from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Analyze(args) => analyze::run_analyze(&config, args).await,
        Commands::Ping { channel } => ping::run_ping(&config, &channel).await,
    }
}

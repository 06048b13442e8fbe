mod availability;
mod chart;
mod pricing;

use std::env::VarError;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "domovi-cli")]
#[command(about = "Extract eldercare availability and pricing data from PDF reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract today's availability report and update the chart
    Availability {
        /// Report URL (defaults to DOMOVI_AVAILABILITY_PDF_URL)
        #[arg(long)]
        url: Option<String>,
        /// Extract and parse, but write nothing
        #[arg(long)]
        dry_run: bool,
    },
    /// Extract the price list of every configured facility
    Pricing {
        /// Process only this URL from pricing-urls.json
        #[arg(long)]
        only: Option<String>,
        /// Extract and parse, but write nothing
        #[arg(long)]
        dry_run: bool,
    },
    /// Maintain the availability chart
    Chart {
        #[command(subcommand)]
        command: ChartCommands,
    },
}

#[derive(Debug, Subcommand)]
enum ChartCommands {
    /// Rebuild chart.json from the dated artifacts on disk
    Rebuild {
        /// Directory holding the dated artifacts and chart.json
        #[arg(long, env = "DOMOVI_DATA_DIR", default_value = "./src/data")]
        data_dir: PathBuf,
        /// Report what would be written without touching chart.json
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    run(cli, |key| std::env::var(key)).await
}

/// Dispatch a parsed command. Configuration is read through `lookup`, and
/// for the extraction commands it is loaded before anything else so a
/// missing credential fails before any network or file access.
async fn run<F>(cli: Cli, lookup: F) -> anyhow::Result<()>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match cli.command {
        Commands::Availability { url, dry_run } => {
            let config =
                domovi_core::load_app_config_with(&lookup).context("invalid configuration")?;
            init_tracing(&config.log_level);
            availability::run_availability(&config, url.as_deref(), dry_run).await
        }
        Commands::Pricing { only, dry_run } => {
            let config =
                domovi_core::load_app_config_with(&lookup).context("invalid configuration")?;
            init_tracing(&config.log_level);
            pricing::run_pricing(&config, only.as_deref(), dry_run).await
        }
        Commands::Chart {
            command: ChartCommands::Rebuild { data_dir, dry_run },
        } => {
            let level = lookup("DOMOVI_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
            init_tracing(&level);
            chart::run_chart_rebuild(&data_dir, dry_run)
        }
    }
}

/// Install the stderr `fmt` subscriber. `RUST_LOG` wins over `fallback`.
///
/// A subscriber that is already installed (e.g. by an earlier test) is kept.
fn init_tracing(fallback: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

//! cm-pricer - Fast, stateless Cardmarket single-card price lookup CLI
//!
//! Thin bootstrap around the library pipeline: argument parsing,
//! logging, config layering, and output formatting.

use anyhow::Result;
use clap::Parser;
use cm_pricer::commands::PricesCommand;
use cm_pricer::config::{Config, OutputFormat};
use cm_pricer::format::Formatter;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cm-pricer",
    version,
    about = "Fast, stateless Cardmarket single-card price lookup CLI",
    long_about = "Resolves a card identifier or free-text query to its Cardmarket product page \
                  and reports the lowest and median listed prices among filtered offers."
)]
struct Cli {
    /// Exact card identifier (e.g. DRI209) or free-text query (e.g. "Pikachu 160")
    query: String,

    /// Cookie header string "name=value; name2=value2"
    #[arg(long, env = "CM_COOKIE")]
    cookie: Option<String>,

    /// Cookie file (browser export or single-line header form)
    #[arg(long, env = "CM_COOKIE_FILE")]
    cookie_file: Option<PathBuf>,

    /// Local HTML file used instead of fetching the lowest-price page
    #[arg(long)]
    html_file: Option<PathBuf>,

    /// Local HTML file used instead of fetching the median-price page
    #[arg(long)]
    html_file_median: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30", env = "CM_TIMEOUT")]
    timeout: u64,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "plain")]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    config.timeout_secs = cli.timeout;
    config.format = cli.format;

    if let Some(cookie) = cli.cookie {
        config.cookie = Some(cookie);
    }
    if let Some(path) = cli.cookie_file {
        config.cookie_file = Some(path);
    }
    if let Some(path) = cli.html_file {
        config.html_file = Some(path);
    }
    if let Some(path) = cli.html_file_median {
        config.html_file_median = Some(path);
    }

    let format = config.format;
    let cmd = PricesCommand::new(config);
    let report = cmd.execute(&cli.query).await?;

    let formatter = Formatter::new(format);
    println!("{}", formatter.format_report(&report));

    Ok(())
}

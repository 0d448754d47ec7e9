mod app;
mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pagerangers_client::TransportError;
use pagerangers_core::SettingsError;
use pagerangers_core::constants::{DEFAULT_LIMIT, DEFAULT_TOP_URLS};
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::output::emit;

const AFTER_HELP: &str = "\
Environment Variables:
  PAGERANGERS_API_TOKEN     Your PageRangers API key (required)
  PAGERANGERS_PROJECT_HASH  Your project identifier (required)
  PAGERANGERS_BASE_URL      Override API base URL (optional)
  PAGERANGERS_TIMEOUT       Request timeout in seconds (default: 30)
  PAGERANGERS_CONFIG        Path to an endpoint config JSON (optional)

Configuration:
  Store credentials in ~/.env.pagerangers:
    PAGERANGERS_API_TOKEN=your_api_key
    PAGERANGERS_PROJECT_HASH=your_project_hash";

#[derive(Parser)]
#[command(name = "pagerangers", version)]
#[command(about = "PageRangers SEO API client", long_about = None, after_help = AFTER_HELP)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
    /// Show debug info on stderr
    #[arg(long, global = true)]
    debug: bool,
    /// Path to API config JSON
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a keyword (SERP, volume, competition)
    Keyword {
        keyword: String,
        /// Top URLs to show
        #[arg(long, default_value_t = DEFAULT_TOP_URLS)]
        top: usize,
    },
    /// Get current keyword rankings for the project
    Rankings {
        /// Max results
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
        #[arg(long)]
        offset: Option<usize>,
    },
    /// Get main KPIs (ranking index, top 10/100 counts)
    Kpis,
    /// Find high-opportunity keywords
    Prospects {
        /// Max results
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
        #[arg(long)]
        offset: Option<usize>,
    },
    /// Prompt-submit hook: print setup instructions when credentials are missing
    Hook,
}

fn init_tracing(debug: bool) {
    let default = if debug { "warn,pagerangers=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).init();
}

async fn run(cli: Cli) -> Result<()> {
    if matches!(cli.command, Commands::Hook) {
        commands::hook::run();
        return Ok(());
    }
    let app = App::from_env(cli.config.as_deref())?;
    match cli.command {
        Commands::Keyword { keyword, top } => {
            let report = commands::keyword::run(&app, &keyword, top).await?;
            emit(&report, cli.json, &mut std::io::stdout())
        },
        Commands::Rankings { limit, offset } => {
            let report = commands::rankings::run(&app, limit, offset).await?;
            emit(&report, cli.json, &mut std::io::stdout())
        },
        Commands::Kpis => {
            let report = commands::kpis::run(&app).await?;
            emit(&report, cli.json, &mut std::io::stdout())
        },
        Commands::Prospects { limit, offset } => {
            let report = commands::prospects::run(&app, limit, offset).await?;
            emit(&report, cli.json, &mut std::io::stdout())
        },
        Commands::Hook => Ok(()),
    }
}

fn report_error(err: &anyhow::Error) {
    if let Some(SettingsError::MissingCredentials { .. }) = err.downcast_ref::<SettingsError>() {
        eprintln!("Error: Missing credentials.");
        eprintln!("\nSet environment variables or create ~/.env.pagerangers with:");
        eprintln!("  PAGERANGERS_API_TOKEN=your_api_key");
        eprintln!("  PAGERANGERS_PROJECT_HASH=your_project_hash");
        return;
    }
    eprintln!("Error: {err}");
    if let Some(guidance) = err.downcast_ref::<TransportError>().and_then(|e| e.category().guidance()) {
        eprintln!("{guidance}");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            report_error(&err);
            ExitCode::FAILURE
        },
    }
}

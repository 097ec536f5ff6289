//! trialmap - Tunisian clinical trials by governorate
//!
//! Pulls every study with a site in Tunisia from ClinicalTrials.gov,
//! attributes each one to the governorates its locations fall in, and
//! prints the per-governorate views.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "trialmap")]
#[command(about = "Tunisian clinical trials by governorate")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./trialmap.toml or ~/.config/trialmap/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Registry studies endpoint
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Studies per listing page
    #[arg(long, global = true)]
    page_size: Option<u32>,

    /// Request timeout in seconds (0 disables)
    #[arg(long, global = true)]
    request_timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Command {
    /// Trial counts and phases for all 24 governorates
    Map(cmd::map::MapArgs),
    /// Trials attributed to one governorate
    State(cmd::state::StateArgs),
    /// Details of one study
    Trial(cmd::trial::TrialArgs),
    /// Resolve map region labels to governorates
    Regions(cmd::regions::RegionsArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Progress context (TTY auto-detect)
    let progress = Arc::new(trialmap_core::ProgressContext::new());

    // Logging:
    //   TTY:     quiet (warn) unless --debug, the spinner shows activity
    //   non-TTY: info unless --debug
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    let quiet = if is_tty { !cli.debug } else { false };
    trialmap_core::init_logging(quiet, cli.debug, multi);

    let mut config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };

    // CLI overrides
    if let Some(url) = cli.base_url {
        config.registry.base_url = url;
    }
    if let Some(size) = cli.page_size {
        config.registry.page_size = size;
    }
    if let Some(secs) = cli.request_timeout {
        config.http.request_timeout = secs;
    }
    trialmap_core::set_http_config(config.http.to_http_config());

    let session = cmd::Session::new(config, progress);

    match cli.command {
        Command::Map(args) => cmd::map::run(args, &session),
        Command::State(args) => cmd::state::run(args, &session),
        Command::Trial(args) => cmd::trial::run(args, &session),
        Command::Regions(args) => cmd::regions::run(args),
        Command::Config => {
            let config = &session.config;
            let http = config.http.to_http_config();
            cmd::print_summary(
                "Setting",
                &[
                    ("Registry URL", config.registry.base_url.clone()),
                    ("Location query", config.registry.location_query.clone()),
                    ("Page size", config.registry.page_size.to_string()),
                    ("Search page size", config.registry.search_page_size.to_string()),
                    ("Connect timeout", format!("{}s", config.http.connect_timeout)),
                    (
                        "Request timeout",
                        http.request_timeout
                            .map_or_else(|| "none".to_string(), |t| format!("{}s", t.as_secs())),
                    ),
                    ("User agent", http.user_agent),
                    (
                        "Aliases",
                        format!(
                            "{} ({} from config)",
                            session.aliases.len(),
                            config.aliases.len()
                        ),
                    ),
                ],
            );
            Ok(())
        }
    }
}

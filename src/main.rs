//! Main entry point for the Battle Board leaderboard
//!
//! Loads a snapshot of game logs, ranks players for the requested role and
//! prints the result as a table or as JSON.

use anyhow::{anyhow, Result};
use battle_board::config::AppConfig;
use battle_board::display::{render_json, render_roles, render_table};
use battle_board::source::JsonFileLogSource;
use battle_board::types::RoleFilter;
use battle_board::Leaderboard;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Output format for the ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

/// Battle Board - player rankings from game result logs
#[derive(Parser)]
#[command(
    name = "battle-board",
    version,
    about = "Rank players by wins from a log of game results",
    long_about = "Battle Board reads a JSON array of game results (user_id, user_name, role, \
                 is_win, created_at), groups them per player and prints wins, win rate and \
                 current winning streak, optionally restricted to a single role."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Game log file override
    #[arg(long, value_name = "FILE", help = "JSON file with an array of game logs")]
    logs: Option<PathBuf>,

    /// Role to rank
    #[arg(
        short,
        long,
        value_name = "ROLE",
        default_value = "ALL",
        help = "Only count games played in this role (ALL for every role)"
    )]
    role: RoleFilter,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// List the roles present in the logs and exit
    #[arg(long, help = "List available role filters and exit")]
    list_roles: bool,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without reading logs")]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
///
/// Logs go to stderr so the ranking on stdout stays machine readable.
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment, config file and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(logs) = &args.logs {
        config.source.logs_path = Some(logs.clone());
    }

    battle_board::config::validate_config(&config)?;
    Ok(config)
}

async fn run(args: &Args, config: &AppConfig) -> Result<()> {
    let logs_path = config
        .source
        .logs_path
        .clone()
        .ok_or_else(|| anyhow!("No game log file given (use --logs or LOGS_PATH)"))?;

    let source = JsonFileLogSource::new(logs_path);
    let board = Leaderboard::load(&source, &config.ranking).await?;

    if args.list_roles {
        print!("{}", render_roles(&board.roles()));
        return Ok(());
    }

    let ranking = board.ranking(&args.role)?;
    debug!(
        "Ranking for {} has {} players out of {}",
        args.role,
        ranking.len(),
        board.player_count()?
    );

    match args.format {
        OutputFormat::Table => print!("{}", render_table(&ranking, &args.role)),
        OutputFormat::Json => println!("{}", render_json(&ranking)?),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    // Initialize logging early (before any other operations)
    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if args.dry_run {
        info!("Configuration validation successful");
        info!("   Service: {}", config.service.name);
        info!("   Log level: {}", config.service.log_level);
        match &config.source.logs_path {
            Some(path) => info!("   Logs: {}", path.display()),
            None => info!("   Logs: <not set>"),
        }
        info!("Dry run completed - exiting without reading logs");
        return Ok(());
    }

    if let Err(e) = run(&args, &config).await {
        error!("Failed to build leaderboard: {}", e);
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use datepicker::calendar::{Clock, FixedClock, SystemClock};
use datepicker::commands;
use datepicker::config;
use datepicker::grid::CalendarGrid;
use datepicker::picker::SelectionMode;

// Default Configuration Constants
/// Default log level when not specified
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file path (no logging to file)
const DEFAULT_LOG_FILE: &str = "/dev/null";

#[derive(Parser)]
#[command(name = "datepicker")]
#[command(
    about = "Terminal calendar date picker",
    long_about = "Terminal calendar date picker\n\nIf no command is specified, the picker opens in interactive mode and prints the selection on exit."
)]
struct Cli {
    /// Set log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Log file path (default: /dev/null for no logging)
    #[arg(short = 'F', long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    /// Pick a start/end range instead of a single date
    #[arg(short, long)]
    range: bool,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(short, long, global = true)]
    date: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the month grid for today (or --date)
    Month,
    /// Display current configuration
    Config,
}

fn init_logging(log_level: &str, log_file: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file, e);
            return;
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Handle the config command - display current configuration
fn handle_config_command(cfg: &config::Config) {
    let (path_str, exists) = match config::get_config_path() {
        Some(path) => {
            let exists = path.exists();
            (path.display().to_string(), exists)
        }
        None => ("Unable to determine config path".to_string(), false),
    };

    println!("Configuration File: {} (Exists: {})", path_str, if exists { "yes" } else { "no" });
    println!();
    println!("Current Configuration:");
    println!("=====================");
    println!("log_level: {}", cfg.log_level);
    println!("log_file: {}", cfg.log_file);
    println!("range: {}", cfg.range);
    println!();
    println!("[theme]");
    println!("selection_fg: {:?}", cfg.theme.selection_fg);
    println!("range_bg: {:?}", cfg.theme.range_bg);
    println!("today_fg: {:?}", cfg.theme.today_fg);
}

/// Resolve log configuration from CLI args and config file
/// CLI arguments take precedence over config file
fn resolve_log_config<'a>(cli: &'a Cli, config: &'a config::Config) -> (&'a str, &'a str) {
    let log_level = if cli.log_level != DEFAULT_LOG_LEVEL {
        cli.log_level.as_str()
    } else {
        config.log_level.as_str()
    };

    let log_file = if cli.log_file != DEFAULT_LOG_FILE {
        cli.log_file.as_str()
    } else {
        config.log_file.as_str()
    };

    (log_level, log_file)
}

fn build_clock(date: Option<&str>) -> anyhow::Result<Box<dyn Clock>> {
    match date {
        Some(date_str) => {
            let today = commands::parse_date(date_str).context("Invalid --date")?;
            Ok(Box::new(FixedClock(today)))
        }
        None => Ok(Box::new(SystemClock)),
    }
}

async fn execute(cli: Cli, cfg: config::Config) -> anyhow::Result<()> {
    let clock = build_clock(cli.date.as_deref())?;
    let grid = CalendarGrid::new(clock);

    match cli.command {
        Some(Commands::Config) => handle_config_command(&cfg),
        Some(Commands::Month) => commands::month::run(&grid),
        None => {
            let mode = SelectionMode::from_range_flag(cli.range || cfg.range);
            tracing::info!("Starting picker in {:?} mode", mode);
            let selection = datepicker::tui::run(mode, grid, &cfg)
                .await
                .context("Error running picker")?;
            if let Some(selection) = selection {
                println!("{}", selection);
            }
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cfg = config::read();
    let cli = Cli::parse();

    // Resolve and initialize logging
    let (log_level, log_file) = resolve_log_config(&cli, &cfg);
    if log_file != DEFAULT_LOG_FILE {
        init_logging(log_level, log_file);
    }

    if let Err(e) = execute(cli, cfg).await {
        eprintln!("Error: {:#}", e);
        tracing::error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}

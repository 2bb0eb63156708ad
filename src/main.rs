// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use hinet_selector::app_config::{self, Config, DEFAULT_CONFIG_FILE};
use hinet_selector::file_utils::FileManager;
use hinet_selector::{Controller, SelectOptions};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a starter configuration file
    InitConfig {
        /// Where to write the configuration
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config_path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completions for hinet-selector
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// hinet-selector - select Hi-net/F-net stations on the NIED portal
///
/// Logs in to the Hi-net portal and restricts which stations of a network
/// are enabled for continuous waveform requests.
#[derive(Parser, Debug)]
#[command(name = "hinet-selector")]
#[command(version)]
#[command(about = "Select Hi-net/F-net stations to request waveform data from NIED")]
#[command(long_about = "Select Hi-net/F-net stations to request waveform data from NIED.

EXAMPLES:
    hinet-selector -c 0101                   # Select all Hi-net stations
    hinet-selector -c 0103 -l stations.txt   # Select the listed F-net stations
    hinet-selector -c 0101 -l list --dry-run # Show the request without sending it
    hinet-selector init-config               # Write a starter hinet.json
    hinet-selector completions bash          # Generate bash completions

NOTES:
    1. All stations are selected if -l is omitted.
    2. The list file holds one station per line; lines starting with '#'
       are ignored.
    3. Station names use the 'X.XXXX' form, not 'X.XXXX.X'.
    4. Stations are not checked against the chosen network.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Network code. Hi-net: 0101, F-net: 0103
    #[arg(short = 'c', long = "code", value_name = "CODE")]
    code: Option<String>,

    /// Station list file
    #[arg(short = 'l', long = "list", value_name = "LIST")]
    list: Option<PathBuf>,

    /// Configuration file path (default: ./hinet.json, then the user config dir)
    #[arg(long, env = "HINET_SELECTOR_CONFIG")]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Build the request and log it without contacting the portal
    #[arg(long)]
    dry_run: bool,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger);
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }

    // HTTP stack internals only surface from warnings up
    fn is_transport_noise(metadata: &Metadata) -> bool {
        let target = metadata.target();
        (target.starts_with("hyper") || target.starts_with("reqwest") || target.starts_with("cookie_store"))
            && metadata.level() > Level::Warn
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level() && !Self::is_transport_noise(metadata)
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S");
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<7} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() {
    // Info until the configuration says otherwise
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let cli = CommandLineOptions::parse();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(mut cli: CommandLineOptions) -> Result<()> {
    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    match cli.command.take() {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "hinet-selector", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::InitConfig { config_path, force }) => init_config(&config_path, force),
        None => {
            let code = cli.code.clone().ok_or_else(|| {
                anyhow!("Network code is required (-c 0101 for Hi-net, -c 0103 for F-net)")
            })?;
            run_select(&cli, code).await
        }
    }
}

async fn run_select(cli: &CommandLineOptions, code: String) -> Result<()> {
    let config_path = resolve_config_path(cli.config_path.as_ref());
    let config = Config::load(&config_path)?;

    // Command line level wins over the configured one
    if cli.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let controller = Controller::with_config(config)
        .with_context(|| format!("Configuration validation failed for {}", config_path.display()))?;

    let options = SelectOptions {
        network_code: code,
        station_list: cli.list.clone(),
        dry_run: cli.dry_run,
    };

    controller.run(&options).await?;
    Ok(())
}

fn init_config(config_path: &PathBuf, force: bool) -> Result<()> {
    let written = Config::default()
        .save(config_path, force)
        .context("Failed to write starter configuration")?;
    if !written {
        warn!("Config file already exists at '{}'. Use -f to overwrite.", config_path.display());
        return Ok(());
    }

    info!("Wrote {}; fill in account.user and account.password.", config_path.display());
    Ok(())
}

// Explicit path, else ./hinet.json, else the per-user config file
fn resolve_config_path(explicit: Option<&PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path.clone();
    }

    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    let candidates = std::iter::once(local.clone()).chain(Config::user_config_path());
    FileManager::first_existing(candidates).unwrap_or(local)
}


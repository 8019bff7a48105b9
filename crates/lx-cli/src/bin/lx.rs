//! Lexis CLI Binary
//!
//! # Usage
//!
//! ```bash
//! # List the symbol table built from a source file
//! lx intern main.src --keywords if,else,while
//!
//! # Replay a scope script and show what each `use` resolves to
//! lx resolve scopes.lx
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use lx_cli::{
    cli::CliConfig,
    commands::{self, intern::InternArgs, resolve::ResolveArgs},
    diagnostics::{report_cli_error, setup_error_reporting},
    Result,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "lx",
    version = env!("CARGO_PKG_VERSION"),
    about = "Lexis: symbol interning and lexical scope resolution"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (use multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Set log level (overrides --verbose/--quiet)
    #[arg(long, global = true, value_enum)]
    log: Option<LogLevel>,

    /// Set log output format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    log_format: LogFormat,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Intern the identifiers of source files and list the symbol table
    Intern(InternArgs),

    /// Replay a scope script and print what each `use` resolves to
    Resolve(ResolveArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_error_reporting()?;
    setup_logging(cli.verbose, cli.quiet, cli.log, cli.log_format);

    let config = CliConfig::load(cli.config.as_deref())?;

    let result = match cli.command {
        Commands::Intern(args) => commands::intern_command(args, &config),
        Commands::Resolve(args) => commands::resolve_command(args, &config),
    };

    match result {
        Ok(_) => {
            if cli.verbose > 0 {
                info!("Command completed successfully");
            }
            Ok(())
        }
        Err(e) => {
            report_cli_error(e);
            std::process::exit(1);
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool, log_level: Option<LogLevel>, log_format: LogFormat) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if let Some(level) = log_level {
        EnvFilter::new(match level {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        })
    } else if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let formatter = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_level(true);

    match log_format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(formatter)
                .with(filter)
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(formatter.json())
                .with(filter)
                .init();
        }
    }
}

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::filter::LevelFilter;

/// Log level options for the service binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages (the default)
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Parser)]
#[command(name = "dragnet")]
#[command(about = "dragnet - parameter-driven SQL query service with streaming output")]
#[command(version)]
pub struct Cli {
    /// Config file path
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Bind address (overrides config file)
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port (overrides config file)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Database connection string (overrides config file)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(short = 'l', long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The effective level: `--verbose` beats `--log-level`, and the
    /// default is info.
    pub fn effective_log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::DEBUG
        } else {
            self.log_level.unwrap_or(LogLevel::Info).into()
        }
    }
}

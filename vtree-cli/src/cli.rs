//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(
    name = "vtree",
    version,
    about = "Explore a virtual scrolling tree from the terminal",
    long_about = "Windows a synthetic, lazily loaded tree into a fixed-size viewport.\n\n\
                  Reads commands from stdin (scroll, pixels, resize, toggle, expand,\n\
                  collapse, show, help, quit) and prints the visible rows after each."
)]
pub struct Cli {
    /// Settings file (default: <config dir>/settings.json).
    #[arg(long = "settings", value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Number of top-level items.
    #[arg(long = "roots")]
    pub roots: Option<usize>,

    /// Children per expandable item.
    #[arg(long = "fan-out")]
    pub fan_out: Option<usize>,

    /// Levels of nesting below the top level.
    #[arg(long = "depth")]
    pub depth: Option<usize>,

    /// Visible rows.
    #[arg(long = "rows")]
    pub rows: Option<usize>,

    /// Row height in pixels, used by the `pixels` command.
    #[arg(long = "row-height")]
    pub row_height: Option<u32>,

    /// Simulated provider latency in milliseconds.
    #[arg(long = "latency-ms")]
    pub latency_ms: Option<u64>,

    /// Log level written to the log file.
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Write logs to this file instead of the cache directory.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for log::LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

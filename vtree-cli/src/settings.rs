//! Persistent CLI settings.
//!
//! Loaded from a JSON file, then overridden field by field by command-line
//! flags. A missing file yields the defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::{Cli, LogLevelArg};

/// Settings error type.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub roots: usize,
    pub fan_out: usize,
    pub depth: usize,
    pub rows: usize,
    pub row_height: u32,
    pub indent_width: u32,
    pub latency_ms: u64,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            roots: 1_000,
            fan_out: 10,
            depth: 3,
            rows: 20,
            row_height: 32,
            indent_width: 20,
            latency_ms: 0,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let display = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
            path: display,
            source,
        })
    }

    /// Apply command-line overrides.
    pub fn apply(mut self, cli: &Cli) -> Self {
        if let Some(roots) = cli.roots {
            self.roots = roots;
        }
        if let Some(fan_out) = cli.fan_out {
            self.fan_out = fan_out;
        }
        if let Some(depth) = cli.depth {
            self.depth = depth;
        }
        if let Some(rows) = cli.rows {
            self.rows = rows;
        }
        if let Some(row_height) = cli.row_height {
            self.row_height = row_height;
        }
        if let Some(latency_ms) = cli.latency_ms {
            self.latency_ms = latency_ms;
        }
        if let Some(level) = cli.log_level {
            self.log_level = format!("{:?}", level).to_lowercase();
        }
        self
    }

    pub fn latency(&self) -> Option<Duration> {
        (self.latency_ms > 0).then(|| Duration::from_millis(self.latency_ms))
    }

    /// Parsed log level; unknown names fall back to `info`.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level
            .parse()
            .unwrap_or(log::LevelFilter::from(LogLevelArg::Info))
    }
}

//! Append-only activity log for the clipboard agent.
//!
//! Lines look like `[2025-01-31 09:15:02] [INFO] message`. The file is never
//! read back by the program.

use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Severity tag written into each line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Error => "ERROR",
        }
    }
}

/// Handle to the activity log file
#[derive(Debug, Clone)]
pub struct ActivityLog {
    path: PathBuf,
}

impl ActivityLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write an entry, mirroring it to tracing. Write failures are reported
    /// through tracing only.
    pub fn record(&self, level: Level, entry: &str) {
        match level {
            Level::Info => info!("✅ {}", entry),
            Level::Error => warn!("⚠️ {}", entry),
        }

        if let Err(e) = self.append(level, entry) {
            warn!("Failed to write activity log {:?}: {}", self.path, e);
        }
    }

    pub fn info(&self, entry: &str) {
        self.record(Level::Info, entry);
    }

    pub fn error(&self, entry: &str) {
        self.record(Level::Error, entry);
    }

    fn append(&self, level: Level, entry: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        writeln!(
            file,
            "[{}] [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            level.tag(),
            entry
        )?;
        Ok(())
    }
}

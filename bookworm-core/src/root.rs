//! File layout of an agent root directory.
//!
//! ```text
//! <root>/
//! ├── settings.json
//! ├── CLAUDE.md
//! ├── debug/
//! │   ├── activity-*.jsonl
//! │   ├── security-*.jsonl
//! │   ├── route-feedback.jsonl
//! │   └── evolution-log.jsonl
//! ├── projects/<any>/memory/evolution-log.jsonl
//! └── scripts/
//!     ├── health-check.js
//!     └── quality-analyzer.js
//! ```

use crate::ingest::discover;
use std::path::{Path, PathBuf};

pub const ACTIVITY_PATTERN: &str = "activity-*.jsonl";
pub const SECURITY_PATTERN: &str = "security-*.jsonl";
pub const ROUTE_FEEDBACK_FILE: &str = "route-feedback.jsonl";
pub const EVOLUTION_LOG_FILE: &str = "evolution-log.jsonl";
pub const HEALTH_CHECK_SCRIPT: &str = "health-check.js";
pub const QUALITY_ANALYZER_SCRIPT: &str = "quality-analyzer.js";

/// A resolved agent root directory.
#[derive(Debug, Clone)]
pub struct AgentRoot {
    path: PathBuf,
}

impl AgentRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn debug_dir(&self) -> PathBuf {
        self.path.join("debug")
    }

    pub fn projects_dir(&self) -> PathBuf {
        self.path.join("projects")
    }

    pub fn scripts_dir(&self) -> PathBuf {
        self.path.join("scripts")
    }

    /// `CLAUDE.md` at the root.
    pub fn instructions_file(&self) -> PathBuf {
        self.path.join("CLAUDE.md")
    }

    pub fn activity_logs(&self) -> Vec<PathBuf> {
        discover(&self.debug_dir(), ACTIVITY_PATTERN)
    }

    pub fn security_logs(&self) -> Vec<PathBuf> {
        discover(&self.debug_dir(), SECURITY_PATTERN)
    }

    pub fn route_feedback_log(&self) -> PathBuf {
        self.debug_dir().join(ROUTE_FEEDBACK_FILE)
    }

    /// Locate the evolution log.
    ///
    /// `debug/evolution-log.jsonl` wins; otherwise the first
    /// `projects/<dir>/memory/evolution-log.jsonl` in directory listing order.
    pub fn evolution_log(&self) -> Option<PathBuf> {
        let primary = self.debug_dir().join(EVOLUTION_LOG_FILE);
        if primary.is_file() {
            return Some(primary);
        }

        let entries = std::fs::read_dir(self.projects_dir()).ok()?;
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|dir| dir.is_dir())
            .map(|dir| dir.join("memory").join(EVOLUTION_LOG_FILE))
            .find(|candidate| candidate.is_file())
    }

    pub fn health_check_script(&self) -> PathBuf {
        self.scripts_dir().join(HEALTH_CHECK_SCRIPT)
    }

    pub fn quality_analyzer_script(&self) -> PathBuf {
        self.scripts_dir().join(QUALITY_ANALYZER_SCRIPT)
    }
}

//! Configuration loading and root directory resolution
//!
//! Configuration is loaded from `~/.config/bookworm/config.toml`. Every
//! section is optional; a missing file means defaults throughout.
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/bookworm/` (~/.config/bookworm/)
//! - State/Logs: `$XDG_STATE_HOME/bookworm/` (~/.local/state/bookworm/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the agent root directory.
pub const ROOT_ENV_VAR: &str = "CLAUDE_CONFIG_DIR";

/// File whose presence marks a directory as a valid agent root.
pub const ROOT_MARKER: &str = "settings.json";

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Input root and output file locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Collector tuning
    #[serde(default)]
    pub collect: CollectConfig,

    /// External script invocation
    #[serde(default)]
    pub external: ExternalConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Path configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// Fixed fallback root, tried after the environment override
    pub root: Option<PathBuf>,

    /// Where the snapshot is written
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root: None,
            output: default_output(),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("data.json")
}

/// Collector configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CollectConfig {
    /// Trailing window for event classification, in days
    #[serde(default = "default_event_window_days")]
    pub event_window_days: u32,

    /// Window passed to the quality analyzer, in days
    #[serde(default = "default_quality_window_days")]
    pub quality_window_days: u32,

    /// Length of top-N lists
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            event_window_days: default_event_window_days(),
            quality_window_days: default_quality_window_days(),
            top_n: default_top_n(),
        }
    }
}

fn default_event_window_days() -> u32 {
    7
}

fn default_quality_window_days() -> u32 {
    30
}

fn default_top_n() -> usize {
    10
}

/// External script configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExternalConfig {
    /// Interpreter used for the health-check and quality-analyzer scripts
    #[serde(default = "default_node")]
    pub node: String,

    /// Health-check timeout in seconds
    #[serde(default = "default_health_timeout")]
    pub health_timeout_secs: u64,

    /// Quality-analyzer timeout in seconds
    #[serde(default = "default_quality_timeout")]
    pub quality_timeout_secs: u64,
}

impl Default for ExternalConfig {
    fn default() -> Self {
        Self {
            node: default_node(),
            health_timeout_secs: default_health_timeout(),
            quality_timeout_secs: default_quality_timeout(),
        }
    }
}

fn default_node() -> String {
    "node".to_string()
}

fn default_health_timeout() -> u64 {
    10
}

fn default_quality_timeout() -> u64 {
    30
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/bookworm/config.toml` (~/.config/bookworm/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("bookworm").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/bookworm/` (~/.local/state/bookworm/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("bookworm")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/bookworm/bookworm.log` (~/.local/state/bookworm/bookworm.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("bookworm.log")
    }

    /// Root candidates in precedence order: environment override, configured
    /// fallback, then `~/.claude`.
    pub fn root_candidates(&self) -> Vec<PathBuf> {
        let env_override = std::env::var_os(ROOT_ENV_VAR).map(PathBuf::from);
        root_candidates(env_override, self.paths.root.clone(), &home_dir())
    }

    /// Resolve the agent root directory from the process environment.
    pub fn resolve_root(&self) -> PathBuf {
        resolve_root(&self.root_candidates())
    }
}

/// Build the ordered candidate list for [`resolve_root`].
pub fn root_candidates(
    env_override: Option<PathBuf>,
    configured: Option<PathBuf>,
    home: &Path,
) -> Vec<PathBuf> {
    env_override
        .into_iter()
        .chain(configured)
        .chain(std::iter::once(home.join(".claude")))
        .collect()
}

/// Returns the first candidate containing `settings.json`.
///
/// When nothing validates, the last candidate is returned so collectors can
/// still render their empty shapes against it.
pub fn resolve_root(candidates: &[PathBuf]) -> PathBuf {
    if let Some(found) = candidates.iter().find(|c| c.join(ROOT_MARKER).is_file()) {
        tracing::debug!(root = %found.display(), "Resolved agent root");
        return found.clone();
    }

    let fallback = candidates.last().cloned().unwrap_or_else(|| PathBuf::from("."));
    tracing::warn!(
        root = %fallback.display(),
        candidates = candidates.len(),
        "No candidate root contains {}, using fallback",
        ROOT_MARKER
    );
    fallback
}

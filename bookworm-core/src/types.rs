//! Summary shapes produced by the collectors.
//!
//! Every summary has a complete default value: a collector that finds no
//! input returns the default rather than omitting fields, so the dashboard
//! always sees the same keys.
//!
//! | Summary | Source |
//! |---------|--------|
//! | [`EventSummary`] | `debug/activity-*.jsonl`, trailing window |
//! | [`Ranking`] (skills) | `debug/route-feedback.jsonl` |
//! | [`Ranking`] (MCP tools) | `debug/activity-*.jsonl`, all records |
//! | [`SecuritySummary`] | `debug/security-*.jsonl` |
//! | [`DiskSummary`] | the whole root directory |
//! | [`EvolutionSummary`] | `evolution-log.jsonl` |
//! | [`SystemInfo`] | `CLAUDE.md` |

use crate::format::PLACEHOLDER;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `(name, count)` pairs sorted by count descending, ties in first-seen order.
pub type Ranking = Vec<(String, u64)>;

// ============================================
// Events
// ============================================

/// Activity counts within the event window.
///
/// Each record lands in at most one bucket; `total` counts every record in
/// the window, including uncategorized ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    pub total: u64,
    pub skills: u64,
    pub agents: u64,
    pub mcp: u64,
    pub bash: u64,
    pub write: u64,
}

/// Bucket an activity record falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Skill,
    Agent,
    Mcp,
    Bash,
    Write,
    Other,
}

impl EventKind {
    /// Classify by `type`/`tool` using first-match priority.
    pub fn classify(kind: &str) -> Self {
        if kind.contains("Skill") {
            EventKind::Skill
        } else if kind.contains("Task") || kind.contains("agent") {
            EventKind::Agent
        } else if kind.contains("mcp") {
            EventKind::Mcp
        } else if kind == "Bash" {
            EventKind::Bash
        } else if kind == "Write" || kind == "Edit" {
            EventKind::Write
        } else {
            EventKind::Other
        }
    }
}

impl EventSummary {
    /// Count one in-window record.
    pub fn record(&mut self, kind: EventKind) {
        self.total += 1;
        match kind {
            EventKind::Skill => self.skills += 1,
            EventKind::Agent => self.agents += 1,
            EventKind::Mcp => self.mcp += 1,
            EventKind::Bash => self.bash += 1,
            EventKind::Write => self.write += 1,
            EventKind::Other => {}
        }
    }
}

// ============================================
// Security
// ============================================

/// Permission outcome recorded by a security hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityAction {
    Deny,
    Ask,
    Other,
}

impl SecurityAction {
    pub fn classify(action: Option<&str>) -> Self {
        match action {
            Some("deny") | Some("blocked") => SecurityAction::Deny,
            Some("ask") | Some("prompted") => SecurityAction::Ask,
            _ => SecurityAction::Other,
        }
    }
}

/// Security hook activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecuritySummary {
    pub total: u64,
    pub deny: u64,
    pub ask: u64,
    /// Per-hook counts, sorted by `deny + ask` descending
    pub hooks: Vec<HookBreakdown>,
}

/// Deny/ask counts for one hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookBreakdown {
    pub name: String,
    pub deny: u64,
    pub ask: u64,
    /// Display form, e.g. `"3 deny / 1 ask"`
    pub detail: String,
}

impl HookBreakdown {
    pub fn new(name: impl Into<String>, deny: u64, ask: u64) -> Self {
        Self {
            name: name.into(),
            deny,
            ask,
            detail: format!("{} deny / {} ask", deny, ask),
        }
    }

    pub fn flagged(&self) -> u64 {
        self.deny + self.ask
    }
}

// ============================================
// Disk
// ============================================

/// Size tier of the agent root directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiskStatus {
    #[default]
    Good,
    Warning,
    Critical,
}

impl DiskStatus {
    pub const WARNING_MB: f64 = 8192.0;
    pub const CRITICAL_MB: f64 = 16384.0;

    /// Tier for a total size in MB. Each threshold is inclusive.
    pub fn classify(total_mb: f64) -> Self {
        if total_mb >= Self::CRITICAL_MB {
            DiskStatus::Critical
        } else if total_mb >= Self::WARNING_MB {
            DiskStatus::Warning
        } else {
            DiskStatus::Good
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiskStatus::Good => "GOOD",
            DiskStatus::Warning => "WARNING",
            DiskStatus::Critical => "CRITICAL",
        }
    }
}

/// Disk usage of the agent root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskSummary {
    #[serde(rename = "totalMB")]
    pub total_mb: f64,
    #[serde(rename = "debugMB")]
    pub debug_mb: f64,
    /// `debug/` as a share of the total
    pub debug_percent: u64,
    /// Total as a share of the 4096 MB reference capacity; may exceed 100
    pub bar_percent: u64,
    pub activity_logs: usize,
    pub security_logs: usize,
    pub status: DiskStatus,
}

// ============================================
// Evolution
// ============================================

/// Self-evolution log statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionSummary {
    pub entries: usize,
    /// Version of the last entry in file order
    pub latest_version: String,
    /// Entries carrying `latest_version`
    pub latest_fixes: usize,
    pub versions: BTreeMap<String, usize>,
}

impl Default for EvolutionSummary {
    fn default() -> Self {
        Self {
            entries: 0,
            latest_version: PLACEHOLDER.to_string(),
            latest_fixes: 0,
            versions: BTreeMap::new(),
        }
    }
}

// ============================================
// System info
// ============================================

/// Labeled values mined from `CLAUDE.md`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    pub total_skills: String,
    pub total_agents: String,
    pub mcp_servers: String,
    pub hooks: String,
    pub system_version: String,
}

impl Default for SystemInfo {
    fn default() -> Self {
        Self {
            total_skills: PLACEHOLDER.to_string(),
            total_agents: PLACEHOLDER.to_string(),
            mcp_servers: PLACEHOLDER.to_string(),
            hooks: PLACEHOLDER.to_string(),
            system_version: PLACEHOLDER.to_string(),
        }
    }
}

//! Snapshot assembly and output.
//!
//! A [`Snapshot`] is rebuilt from scratch on every run: each collector is
//! called once, in field order, and the result overwrites the previous file.

use crate::bridge::{collect_health, collect_quality, HealthSummary, QualitySummary};
use crate::collectors::{
    collect_disk, collect_events, collect_evolution, collect_mcp_usage, collect_route_accuracy,
    collect_security, collect_system_info, collect_top_skills, Window,
};
use crate::config::{Config, ExternalConfig};
use crate::error::Result;
use crate::root::AgentRoot;
use crate::types::{
    DiskSummary, EventSummary, EvolutionSummary, Ranking, SecuritySummary, SystemInfo,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Schema version written into every snapshot.
pub const SNAPSHOT_VERSION: &str = "2.0";

/// Time-range label shown by the dashboard.
pub const TIME_RANGE: &str = "7d";

/// The dashboard document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Calendar date of the run, `YYYY-MM-DD`
    pub date: String,
    pub time_range: String,
    pub version: String,
    pub system: SystemInfo,
    pub events: EventSummary,
    pub top_skills: Ranking,
    pub mcp_usage: Ranking,
    pub route_accuracy: String,
    pub security: SecuritySummary,
    pub disk: DiskSummary,
    pub evolution: EvolutionSummary,
    pub health: HealthSummary,
    /// `null` when the quality analyzer is missing or fails
    pub quality: Option<QualitySummary>,
}

/// Everything one collection pass needs.
#[derive(Debug, Clone)]
pub struct CollectContext {
    pub root: AgentRoot,
    pub now: DateTime<Utc>,
    pub window: Window,
    pub top_n: usize,
    pub quality_window_days: u32,
    pub external: ExternalConfig,
}

impl CollectContext {
    /// Context with default tuning, evaluated at `now`.
    pub fn new(root: AgentRoot, now: DateTime<Utc>) -> Self {
        Self::from_config(&Config::default(), root, now)
    }

    pub fn from_config(config: &Config, root: AgentRoot, now: DateTime<Utc>) -> Self {
        Self {
            root,
            now,
            window: Window::Days(config.collect.event_window_days),
            top_n: config.collect.top_n,
            quality_window_days: config.collect.quality_window_days,
            external: config.external.clone(),
        }
    }
}

/// Run every collector against the context's root.
pub fn collect_snapshot(ctx: &CollectContext) -> Snapshot {
    let root = &ctx.root;
    tracing::info!(root = %root.path().display(), "Collecting snapshot");

    let snapshot = Snapshot {
        date: ctx.now.date_naive().format("%Y-%m-%d").to_string(),
        time_range: TIME_RANGE.to_string(),
        version: SNAPSHOT_VERSION.to_string(),
        system: collect_system_info(root),
        events: collect_events(root, ctx.now, ctx.window),
        top_skills: collect_top_skills(root, ctx.top_n),
        mcp_usage: collect_mcp_usage(root, ctx.top_n),
        route_accuracy: collect_route_accuracy(root),
        security: collect_security(root),
        disk: collect_disk(root),
        evolution: collect_evolution(root),
        health: collect_health(root, &ctx.external),
        quality: collect_quality(root, &ctx.external, ctx.quality_window_days),
    };

    tracing::info!(
        events = snapshot.events.total,
        security = snapshot.security.total,
        disk_mb = snapshot.disk.total_mb,
        quality = snapshot.quality.is_some(),
        "Snapshot collected"
    );
    snapshot
}

/// Pretty-print `snapshot` to `path`, replacing any previous file.
pub fn write_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut json = serde_json::to_string_pretty(snapshot)?;
    json.push('\n');
    std::fs::write(path, json)?;
    tracing::info!(path = %path.display(), "Snapshot written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::Value;
    use tempfile::TempDir;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 23, 59, 30).unwrap()
    }

    #[test]
    fn test_empty_root_has_full_shape() {
        let tmp = TempDir::new().unwrap();
        let ctx = CollectContext::new(AgentRoot::new(tmp.path().join("missing")), fixed_now());
        let snapshot = collect_snapshot(&ctx);

        // top-level keys appear in declaration order
        let text = serde_json::to_string_pretty(&snapshot).unwrap();
        let positions: Vec<usize> = [
            "date",
            "timeRange",
            "version",
            "system",
            "events",
            "topSkills",
            "mcpUsage",
            "routeAccuracy",
            "security",
            "disk",
            "evolution",
            "health",
            "quality",
        ]
        .iter()
        .map(|key| text.find(&format!("\n  \"{key}\": ")).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 13);
        assert_eq!(value["date"], "2026-10-19");
        assert_eq!(value["timeRange"], "7d");
        assert_eq!(value["version"], "2.0");
        assert_eq!(value["system"]["totalSkills"], "--");
        assert_eq!(value["events"]["total"], 0);
        assert_eq!(value["topSkills"], serde_json::json!([]));
        assert_eq!(value["routeAccuracy"], "--");
        assert_eq!(value["disk"]["status"], "GOOD");
        assert_eq!(value["evolution"]["latestVersion"], "--");
        assert_eq!(value["health"]["dimensions"].as_array().unwrap().len(), 9);
        assert_eq!(value["quality"], Value::Null);
    }

    #[test]
    fn test_rankings_serialize_as_pairs() {
        let tmp = TempDir::new().unwrap();
        let root = AgentRoot::new(tmp.path());
        std::fs::create_dir_all(root.debug_dir()).unwrap();
        std::fs::write(
            root.route_feedback_log(),
            "{\"routed\":\"pdf\"}\n{\"routed\":\"pdf\"}\n{\"routed\":\"xlsx\"}\n",
        )
        .unwrap();

        let value = serde_json::to_value(collect_snapshot(&CollectContext::new(root, fixed_now())))
            .unwrap();
        assert_eq!(value["topSkills"], serde_json::json!([["pdf", 2], ["xlsx", 1]]));
        assert_eq!(value["routeAccuracy"], "100%");
    }

    #[test]
    fn test_write_is_idempotent_and_overwrites() {
        let tmp = TempDir::new().unwrap();
        let root = AgentRoot::new(tmp.path().join("root"));
        let out = tmp.path().join("site/data.json");

        std::fs::create_dir_all(out.parent().unwrap()).unwrap();
        std::fs::write(&out, "{\"stale\": true, \"padding\": \"".to_string() + &"x".repeat(4096) + "\"}")
            .unwrap();

        let ctx = CollectContext::new(root, fixed_now());
        write_snapshot(&collect_snapshot(&ctx), &out).unwrap();
        let first = std::fs::read_to_string(&out).unwrap();
        write_snapshot(&collect_snapshot(&ctx), &out).unwrap();
        let second = std::fs::read_to_string(&out).unwrap();

        assert_eq!(first, second);
        assert!(first.ends_with("}\n"));
        assert!(!first.contains("stale"));

        let parsed: Snapshot = serde_json::from_str(&first).unwrap();
        assert_eq!(parsed.version, SNAPSHOT_VERSION);
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("a/b/data.json");
        let ctx = CollectContext::new(AgentRoot::new(tmp.path()), fixed_now());
        write_snapshot(&collect_snapshot(&ctx), &out).unwrap();
        assert!(out.is_file());
    }
}

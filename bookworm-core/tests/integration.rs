//! End-to-end collection over the `claude-root` fixture tree.

use bookworm_core::snapshot::CollectContext;
use bookworm_core::{collect_snapshot, write_snapshot, AgentRoot, DiskStatus, Snapshot};
use chrono::{Duration, Utc};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/claude-root")
}

/// Copy the fixture tree so tests can add files to it.
fn seed_root(target: &Path) {
    let source = fixture_root();
    for entry in WalkDir::new(&source).into_iter().flatten() {
        let relative = entry.path().strip_prefix(&source).expect("entry outside fixture");
        let dest = target.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest).expect("failed to create fixture dir");
        } else {
            fs::copy(entry.path(), &dest).expect("failed to copy fixture file");
        }
    }
}

/// Activity log with timestamps relative to now, so the 7-day window is stable.
fn write_activity_log(root: &AgentRoot) {
    let now = Utc::now();
    let at = |days: i64| (now - Duration::days(days)).to_rfc3339();
    let lines = [
        json!({ "timestamp": at(0), "type": "Skill", "name": "pdf" }),
        json!({ "timestamp": at(1), "tool": "Task" }),
        json!({ "timestamp": at(1), "tool": "mcp__github__search_issues" }),
        json!({ "timestamp": at(2), "tool": "mcp__github__search_issues" }),
        json!({ "timestamp": at(2), "type": "mcp_call", "name": "fetch" }),
        json!({ "timestamp": at(3), "tool": "Bash" }),
        json!({ "timestamp": at(3), "tool": "Bash" }),
        json!({ "timestamp": at(4), "tool": "Edit" }),
        json!({ "timestamp": at(5), "tool": "Read" }),
        // outside the window: still counted for MCP usage
        json!({ "timestamp": at(30), "tool": "mcp__filesystem__read_file" }),
        json!({ "timestamp": at(30), "tool": "Bash" }),
    ];
    let mut text: String = lines.iter().map(|l| format!("{l}\n")).collect();
    text.push_str("{\"truncated\": \n");
    fs::write(root.debug_dir().join("activity-current.jsonl"), text)
        .expect("failed to write activity log");
}

fn collect(root: &AgentRoot) -> Snapshot {
    collect_snapshot(&CollectContext::new(root.clone(), Utc::now()))
}

#[test]
fn test_full_snapshot_from_fixture() {
    bookworm_core::logging::init_test();
    let tmp = TempDir::new().unwrap();
    seed_root(tmp.path());
    let root = AgentRoot::new(tmp.path());
    write_activity_log(&root);

    let snapshot = collect(&root);

    assert_eq!(snapshot.version, "2.0");
    assert_eq!(snapshot.time_range, "7d");
    assert_eq!(snapshot.date, Utc::now().date_naive().format("%Y-%m-%d").to_string());

    // CLAUDE.md
    assert_eq!(snapshot.system.total_skills, "128");
    assert_eq!(snapshot.system.total_agents, "24");
    assert_eq!(snapshot.system.mcp_servers, "6");
    assert_eq!(snapshot.system.hooks, "11");
    assert_eq!(snapshot.system.system_version, "v5.2.1 (stable)");

    // activity log, 7-day window
    let events = &snapshot.events;
    assert_eq!(events.total, 9);
    assert_eq!(events.skills, 1);
    assert_eq!(events.agents, 1);
    assert_eq!(events.mcp, 3);
    assert_eq!(events.bash, 2);
    assert_eq!(events.write, 1);

    assert_eq!(
        snapshot.mcp_usage,
        vec![
            ("mcp__github__search_issues".to_string(), 2),
            ("fetch".to_string(), 1),
            ("mcp__filesystem__read_file".to_string(), 1),
        ]
    );

    // route feedback: 10 entries, 2 corrections
    assert_eq!(snapshot.route_accuracy, "80%");
    assert_eq!(
        snapshot.top_skills,
        vec![
            ("pdf".to_string(), 4),
            ("xlsx".to_string(), 3),
            ("docx".to_string(), 1),
            ("pptx".to_string(), 1),
            ("webapp-testing".to_string(), 1),
        ]
    );

    // security logs across two files, malformed line dropped
    let security = &snapshot.security;
    assert_eq!(security.total, 7);
    assert_eq!(security.deny, 3);
    assert_eq!(security.ask, 3);
    let hooks: Vec<(&str, u64, u64)> = security
        .hooks
        .iter()
        .map(|h| (h.name.as_str(), h.deny, h.ask))
        .collect();
    assert_eq!(
        hooks,
        vec![("path-guard", 0, 3), ("bash-guard", 2, 0), ("secret-scan", 1, 0)]
    );

    // disk
    assert_eq!(snapshot.disk.activity_logs, 1);
    assert_eq!(snapshot.disk.security_logs, 2);
    assert_eq!(snapshot.disk.status, DiskStatus::Good);
    assert!(snapshot.disk.debug_mb <= snapshot.disk.total_mb);

    // evolution log found under projects/
    let evolution = &snapshot.evolution;
    assert_eq!(evolution.entries, 6);
    assert_eq!(evolution.latest_version, "5.2.1");
    assert_eq!(evolution.latest_fixes, 2);
    assert_eq!(evolution.versions.get("5.1.0"), Some(&3));
    assert_eq!(evolution.versions.get("5.2.0"), Some(&1));

    // no scripts in the fixture
    assert_eq!(snapshot.health.score.as_i64(), Some(0));
    assert_eq!(snapshot.health.dimensions.len(), 9);
    assert!(snapshot.quality.is_none());
}

#[test]
fn test_debug_evolution_log_takes_precedence() {
    let tmp = TempDir::new().unwrap();
    seed_root(tmp.path());
    let root = AgentRoot::new(tmp.path());
    fs::write(
        root.debug_dir().join("evolution-log.jsonl"),
        "{\"version\":\"6.0.0\"}\n{\"version\":\"5.9.0\"}\n",
    )
    .unwrap();

    let evolution = collect(&root).evolution;
    assert_eq!(evolution.entries, 2);
    assert_eq!(evolution.latest_version, "5.9.0");
    assert_eq!(evolution.latest_fixes, 1);
}

#[test]
fn test_missing_root_renders_default_shape() {
    let tmp = TempDir::new().unwrap();
    let root = AgentRoot::new(tmp.path().join("does-not-exist"));
    let snapshot = collect(&root);

    assert_eq!(snapshot.system.total_skills, "--");
    assert_eq!(snapshot.events.total, 0);
    assert!(snapshot.top_skills.is_empty());
    assert!(snapshot.mcp_usage.is_empty());
    assert_eq!(snapshot.route_accuracy, "--");
    assert_eq!(snapshot.security.total, 0);
    assert!(snapshot.security.hooks.is_empty());
    assert_eq!(snapshot.disk.total_mb, 0.0);
    assert_eq!(snapshot.disk.debug_percent, 0);
    assert_eq!(snapshot.evolution.latest_version, "--");
    assert!(snapshot.evolution.versions.is_empty());
    assert_eq!(snapshot.health.dimensions.len(), 9);
    assert!(snapshot.quality.is_none());
}

#[test]
fn test_rerun_is_identical() {
    let tmp = TempDir::new().unwrap();
    let root_dir = tmp.path().join("root");
    seed_root(&root_dir);
    let root = AgentRoot::new(&root_dir);
    write_activity_log(&root);

    let out = tmp.path().join("out/data.json");
    let ctx = CollectContext::new(root, Utc::now());

    write_snapshot(&collect_snapshot(&ctx), &out).unwrap();
    let first = fs::read(&out).unwrap();
    write_snapshot(&collect_snapshot(&ctx), &out).unwrap();
    let second = fs::read(&out).unwrap();

    assert_eq!(first, second);
    let parsed: serde_json::Value = serde_json::from_slice(&second).unwrap();
    assert_eq!(parsed["routeAccuracy"], "80%");
    assert_eq!(parsed["disk"]["status"], "GOOD");
    assert_eq!(parsed["topSkills"][0], json!(["pdf", 4]));
}

#[cfg(unix)]
#[test]
fn test_external_scripts_through_shell() {
    use bookworm_core::config::ExternalConfig;

    let tmp = TempDir::new().unwrap();
    seed_root(tmp.path());
    let root = AgentRoot::new(tmp.path());
    fs::create_dir_all(root.scripts_dir()).unwrap();
    fs::write(
        root.health_check_script(),
        "echo '{\"totalScore\": 84, \"dimensions\": [{\"name\": \"hooks\", \"score\": 84, \"status\": \"ok\"}]}'\n",
    )
    .unwrap();

    let mut ctx = CollectContext::new(root, Utc::now());
    ctx.external = ExternalConfig {
        node: "sh".to_string(),
        ..Default::default()
    };
    let snapshot = collect_snapshot(&ctx);

    assert_eq!(snapshot.health.score.as_i64(), Some(84));
    assert_eq!(snapshot.health.dimensions[0].status, "ok");
    // no analyzer module in the fixture
    assert!(snapshot.quality.is_none());
}

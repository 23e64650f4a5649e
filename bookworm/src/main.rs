//! bookworm-collect - dashboard snapshot collector
//!
//! Reads the agent root's logs once, writes the dashboard snapshot and
//! prints a short summary.

use anyhow::{Context, Result};
use bookworm_core::format::format_mb;
use bookworm_core::snapshot::CollectContext;
use bookworm_core::{collect_snapshot, write_snapshot, AgentRoot, Config, Snapshot};
use chrono::Utc;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "bookworm-collect")]
#[command(about = "Collect agent logs into the Bookworm dashboard snapshot")]
#[command(version)]
struct Args {
    /// Agent root to read (skips CLAUDE_CONFIG_DIR and config lookup)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Snapshot output path (default: data.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Event window in days
    #[arg(long)]
    days: Option<u32>,

    /// Print the snapshot JSON instead of the summary
    #[arg(long)]
    json: bool,

    /// Mirror logs to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load().context("failed to load configuration")?;
    let _log_guard = bookworm_core::logging::init(&config.logging, args.verbose).ok();

    if let Some(days) = args.days {
        config.collect.event_window_days = days;
    }
    let output = args.output.unwrap_or_else(|| config.paths.output.clone());
    let root_path = match args.root {
        Some(root) => root,
        None => config.resolve_root(),
    };

    let ctx = CollectContext::from_config(&config, AgentRoot::new(root_path), Utc::now());
    let snapshot = collect_snapshot(&ctx);
    write_snapshot(&snapshot, &output)
        .with_context(|| format!("failed to write snapshot to {}", output.display()))?;
    tracing::info!(
        root = %ctx.root.path().display(),
        output = %output.display(),
        "Collection complete"
    );

    if args.json {
        let json = serde_json::to_string_pretty(&snapshot).context("failed to encode snapshot")?;
        println!("{}", json);
    } else {
        print_summary(&snapshot, ctx.root.path(), &output);
    }

    Ok(())
}

fn print_summary(snapshot: &Snapshot, root: &Path, output: &Path) {
    println!("Snapshot written: {}", output.display());
    println!("   Root: {}", root.display());
    println!("   Date: {}   Version: {}", snapshot.date, snapshot.version);
    println!();

    let events = &snapshot.events;
    println!("EVENTS ({})", snapshot.time_range);
    println!(
        "   Total: {:<8} Skills: {:<6} Agents: {:<6} MCP: {:<6} Bash: {:<6} Write: {}",
        events.total, events.skills, events.agents, events.mcp, events.bash, events.write
    );

    println!("ROUTING");
    println!("   Accuracy: {}", snapshot.route_accuracy);
    match snapshot.top_skills.first() {
        Some((name, count)) => println!("   Top skill: {} ({})", name, count),
        None => println!("   Top skill: --"),
    }

    let security = &snapshot.security;
    println!("SECURITY");
    println!(
        "   Events: {:<8} Denied: {:<6} Asked: {}",
        security.total, security.deny, security.ask
    );

    let disk = &snapshot.disk;
    println!("DISK");
    println!(
        "   Total: {:<10} Debug: {:<10} Status: {}",
        format_mb(disk.total_mb),
        format_mb(disk.debug_mb),
        disk.status.as_str()
    );

    let evolution = &snapshot.evolution;
    println!("EVOLUTION");
    println!(
        "   Entries: {:<6} Latest: {} ({} fixes)",
        evolution.entries, evolution.latest_version, evolution.latest_fixes
    );

    println!("HEALTH");
    println!("   Score: {}", snapshot.health.score);
    if let Some(quality) = &snapshot.quality {
        println!(
            "   Quality: {} recommendation(s), {} MCP tool(s) tracked",
            quality.recommendations.len(),
            quality.mcp_tools.len()
        );
    }
}

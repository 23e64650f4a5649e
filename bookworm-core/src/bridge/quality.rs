//! Quality block from the external quality-analyzer module.

use super::external::ExternalCall;
use crate::config::ExternalConfig;
use crate::format::percent;
use crate::root::AgentRoot;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// Length of every list in the quality block.
pub const QUALITY_TOP_N: usize = 5;

/// Loads the analyzer module given as the first argument, calls its
/// `analyze` export (or the module itself when it is a function) with the
/// window in days, awaits the result and prints it as JSON.
const LOADER: &str = "const m = require(require('path').resolve(process.argv[1]));\
const f = typeof m === 'function' ? m : m.analyze;\
Promise.resolve(f(Number(process.argv[2])))\
.then(r => process.stdout.write(JSON.stringify(r)))\
.catch(e => { console.error(e); process.exit(1); });";

/// What the analyzer returns.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuality {
    #[serde(default)]
    top_skills: Vec<Value>,
    #[serde(default)]
    bottom_skills: Vec<Value>,
    #[serde(default)]
    recommendations: Vec<Value>,
    #[serde(default)]
    tool_stats: BTreeMap<String, RawToolStats>,
}

#[derive(Debug, Deserialize)]
struct RawToolStats {
    #[serde(default)]
    calls: u64,
    #[serde(default)]
    success: u64,
}

/// Skill and tool quality over the analyzer's window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualitySummary {
    pub top_skills: Vec<Value>,
    pub bottom_skills: Vec<Value>,
    pub recommendations: Vec<Value>,
    pub mcp_tools: Vec<ToolQuality>,
}

/// Call and success counts for one MCP tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolQuality {
    pub name: String,
    pub calls: u64,
    pub success: u64,
    /// Whole-number percentage of calls that succeeded
    pub success_rate: u64,
}

/// Truncate the analyzer output into a [`QualitySummary`].
///
/// Returns `None` for anything that is not an object of the expected shape;
/// a wrongly typed field discards the whole block.
pub fn summarize_quality(raw: Value) -> Option<QualitySummary> {
    if !raw.is_object() {
        return None;
    }
    let raw: RawQuality = match serde_json::from_value(raw) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(error = %e, "Quality analyzer output has unexpected shape");
            return None;
        }
    };

    let mut mcp_tools: Vec<ToolQuality> = raw
        .tool_stats
        .into_iter()
        .filter(|(name, _)| name.contains("mcp"))
        .map(|(name, stats)| ToolQuality {
            success_rate: percent(stats.success as f64, stats.calls as f64),
            name,
            calls: stats.calls,
            success: stats.success,
        })
        .collect();
    mcp_tools.sort_by_key(|t| std::cmp::Reverse(t.calls));
    mcp_tools.truncate(QUALITY_TOP_N);

    let top = |mut list: Vec<Value>| {
        list.truncate(QUALITY_TOP_N);
        list
    };

    Some(QualitySummary {
        top_skills: top(raw.top_skills),
        bottom_skills: top(raw.bottom_skills),
        recommendations: top(raw.recommendations),
        mcp_tools,
    })
}

/// Invoke the analyzer over `window_days`. `None` on any failure.
pub fn collect_quality(
    root: &AgentRoot,
    config: &ExternalConfig,
    window_days: u32,
) -> Option<QualitySummary> {
    let module = root.quality_analyzer_script();
    if !module.is_file() {
        tracing::debug!(module = %module.display(), "Quality analyzer not present");
        return None;
    }

    let call = ExternalCall::new(
        "quality-analyzer",
        config.node.clone(),
        Duration::from_secs(config.quality_timeout_secs),
    )
    .arg("-e")
    .arg(LOADER)
    .arg(module.to_string_lossy())
    .arg(window_days.to_string())
    .cwd(root.path());

    call.run().and_then(summarize_quality)
}

//! Evolution log collector.

use crate::ingest::{read_jsonl, LogRecord};
use crate::root::AgentRoot;
use crate::types::EvolutionSummary;
use std::collections::BTreeMap;

/// Summarize the evolution log, wherever [`AgentRoot::evolution_log`] finds it.
pub fn collect_evolution(root: &AgentRoot) -> EvolutionSummary {
    let Some(path) = root.evolution_log() else {
        tracing::debug!("No evolution log found");
        return EvolutionSummary::default();
    };
    let summary = summarize_evolution(&read_jsonl(&path));
    tracing::debug!(
        path = %path.display(),
        entries = summary.entries,
        latest = %summary.latest_version,
        "Collected evolution log"
    );
    summary
}

/// The latest version is that of the last entry in file order, not the
/// highest version seen.
pub fn summarize_evolution(records: &[LogRecord]) -> EvolutionSummary {
    let mut summary = EvolutionSummary {
        entries: records.len(),
        ..Default::default()
    };

    let mut versions: BTreeMap<String, usize> = BTreeMap::new();
    for version in records.iter().filter_map(LogRecord::version) {
        *versions.entry(version).or_insert(0) += 1;
    }

    if let Some(latest) = records.last().and_then(LogRecord::version) {
        summary.latest_fixes = versions.get(&latest).copied().unwrap_or(0);
        summary.latest_version = latest;
    }
    summary.versions = versions;
    summary
}

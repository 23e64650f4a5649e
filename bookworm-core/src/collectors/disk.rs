//! Disk usage collector.

use crate::format::{percent, round1};
use crate::ingest::dir_size_mb;
use crate::root::AgentRoot;
use crate::types::{DiskStatus, DiskSummary};

/// Capacity the usage bar is drawn against.
pub const REFERENCE_CAPACITY_MB: f64 = 4096.0;

/// Size the whole root and its `debug/` directory.
pub fn collect_disk(root: &AgentRoot) -> DiskSummary {
    let summary = summarize_disk(
        dir_size_mb(root.path()),
        dir_size_mb(&root.debug_dir()),
        root.activity_logs().len(),
        root.security_logs().len(),
    );
    tracing::debug!(
        total_mb = summary.total_mb,
        debug_mb = summary.debug_mb,
        status = summary.status.as_str(),
        "Collected disk usage"
    );
    summary
}

pub(crate) fn summarize_disk(
    total_mb: f64,
    debug_mb: f64,
    activity_logs: usize,
    security_logs: usize,
) -> DiskSummary {
    DiskSummary {
        total_mb: round1(total_mb),
        debug_mb: round1(debug_mb),
        debug_percent: percent(debug_mb, total_mb),
        bar_percent: percent(total_mb, REFERENCE_CAPACITY_MB),
        activity_logs,
        security_logs,
        status: DiskStatus::classify(total_mb),
    }
}

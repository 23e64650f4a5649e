//! Activity log collectors: event classification and MCP tool usage.

use super::tally::Tally;
use crate::ingest::{read_jsonl, LogRecord};
use crate::root::AgentRoot;
use crate::types::{EventKind, EventSummary, Ranking};
use chrono::{DateTime, Duration, Utc};

/// Trailing time range used to filter time-stamped records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// Records at or after `now - days`
    Days(u32),
    /// Every record, including ones with no usable timestamp
    Unbounded,
}

impl Window {
    /// Whether a record time falls inside the window ending at `now`.
    ///
    /// A window reaching past the representable date range covers everything.
    pub fn contains(&self, ts: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            Window::Days(days) => Duration::try_days(i64::from(*days))
                .and_then(|span| now.checked_sub_signed(span))
                .map_or(true, |start| ts >= start),
            Window::Unbounded => true,
        }
    }
}

impl Default for Window {
    fn default() -> Self {
        Window::Days(7)
    }
}

fn activity_records(root: &AgentRoot) -> impl Iterator<Item = LogRecord> {
    root.activity_logs()
        .into_iter()
        .flat_map(|path| read_jsonl(&path))
}

/// Classify activity records inside `window` into event buckets.
pub fn collect_events(root: &AgentRoot, now: DateTime<Utc>, window: Window) -> EventSummary {
    let summary = summarize_events(activity_records(root), now, window);
    tracing::debug!(
        total = summary.total,
        skills = summary.skills,
        agents = summary.agents,
        "Collected events"
    );
    summary
}

pub(crate) fn summarize_events(
    records: impl IntoIterator<Item = LogRecord>,
    now: DateTime<Utc>,
    window: Window,
) -> EventSummary {
    let mut summary = EventSummary::default();
    for record in records {
        if !window.contains(record.timestamp(), now) {
            continue;
        }
        let kind = record
            .kind()
            .map(EventKind::classify)
            .unwrap_or(EventKind::Other);
        summary.record(kind);
    }
    summary
}

/// Whether an activity record is an MCP tool call.
fn is_mcp_call(record: &LogRecord) -> bool {
    record.record_type().is_some_and(|t| t.contains("mcp"))
        || record.tool().is_some_and(|t| t.starts_with("mcp__"))
}

/// Rank MCP tools by call count across every activity record, unwindowed.
pub fn collect_mcp_usage(root: &AgentRoot, top_n: usize) -> Ranking {
    let ranking = rank_mcp_usage(activity_records(root), top_n);
    tracing::debug!(tools = ranking.len(), "Collected MCP usage");
    ranking
}

pub(crate) fn rank_mcp_usage(records: impl IntoIterator<Item = LogRecord>, top_n: usize) -> Ranking {
    let mut tally = Tally::new();
    for record in records.into_iter().filter(is_mcp_call) {
        tally.add(record.tool_name().unwrap_or("unknown"));
    }
    tally.top(top_n)
}

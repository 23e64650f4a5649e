//! Route feedback collectors: top skills and route accuracy.

use super::tally::Tally;
use crate::format::PLACEHOLDER;
use crate::ingest::{read_jsonl, LogRecord};
use crate::root::AgentRoot;
use crate::types::Ranking;

/// Rank skills named in the route feedback log. No time filtering.
pub fn collect_top_skills(root: &AgentRoot, top_n: usize) -> Ranking {
    let records = read_jsonl(&root.route_feedback_log());
    let ranking = rank_skills(&records, top_n);
    tracing::debug!(feedback = records.len(), skills = ranking.len(), "Collected top skills");
    ranking
}

pub(crate) fn rank_skills(records: &[LogRecord], top_n: usize) -> Ranking {
    let mut tally = Tally::new();
    for skill in records.iter().filter_map(LogRecord::routed_skill) {
        tally.add(skill);
    }
    tally.top(top_n)
}

/// Share of routing decisions that were not corrected, as `"NN%"`.
pub fn collect_route_accuracy(root: &AgentRoot) -> String {
    route_accuracy(&read_jsonl(&root.route_feedback_log()))
}

/// `"--"` when there is no feedback at all.
pub fn route_accuracy(records: &[LogRecord]) -> String {
    if records.is_empty() {
        return PLACEHOLDER.to_string();
    }
    let total = records.len() as f64;
    let corrections = records.iter().filter(|r| r.is_correction()).count() as f64;
    let accuracy = ((1.0 - corrections / total) * 100.0).round() as i64;
    format!("{}%", accuracy)
}

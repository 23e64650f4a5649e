//! Security hook log collector.

use crate::ingest::{read_jsonl, LogRecord};
use crate::root::AgentRoot;
use crate::types::{HookBreakdown, SecurityAction, SecuritySummary};

/// Aggregate every `debug/security-*.jsonl` record. No time filtering.
pub fn collect_security(root: &AgentRoot) -> SecuritySummary {
    let records = root
        .security_logs()
        .into_iter()
        .flat_map(|path| read_jsonl(&path));
    let summary = summarize_security(records);
    tracing::debug!(
        total = summary.total,
        deny = summary.deny,
        ask = summary.ask,
        hooks = summary.hooks.len(),
        "Collected security events"
    );
    summary
}

pub fn summarize_security(records: impl IntoIterator<Item = LogRecord>) -> SecuritySummary {
    let mut summary = SecuritySummary::default();
    // (hook, deny, ask) in first-seen order
    let mut hooks: Vec<(String, u64, u64)> = Vec::new();

    for record in records {
        summary.total += 1;
        let action = SecurityAction::classify(record.action());
        let hook = record.hook().unwrap_or("unknown");

        let slot = match hooks.iter().position(|(name, _, _)| name == hook) {
            Some(i) => i,
            None => {
                hooks.push((hook.to_string(), 0, 0));
                hooks.len() - 1
            }
        };

        match action {
            SecurityAction::Deny => {
                summary.deny += 1;
                hooks[slot].1 += 1;
            }
            SecurityAction::Ask => {
                summary.ask += 1;
                hooks[slot].2 += 1;
            }
            SecurityAction::Other => {}
        }
    }

    summary.hooks = hooks
        .into_iter()
        .map(|(name, deny, ask)| HookBreakdown::new(name, deny, ask))
        .collect();
    summary.hooks.sort_by_key(|h| std::cmp::Reverse(h.flagged()));
    summary
}

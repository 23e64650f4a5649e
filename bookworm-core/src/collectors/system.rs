//! System info mined from labeled lines in `CLAUDE.md`.

use crate::format::PLACEHOLDER;
use crate::ingest::read_text;
use crate::root::AgentRoot;
use crate::types::SystemInfo;
use regex::Regex;

/// What a label's value looks like.
#[derive(Debug, Clone, Copy)]
enum FieldKind {
    /// Leading digits only
    Number,
    /// Rest of the line
    Text,
}

/// Extract the value following `label:` (or `label：`), trimmed.
///
/// Markdown emphasis around the label (`**总技能数**: 42`) is tolerated.
fn extract_field(text: &str, label: &str, kind: FieldKind) -> Option<String> {
    let value = match kind {
        FieldKind::Number => r"(\d+)",
        FieldKind::Text => r"([^\r\n|]+)",
    };
    let pattern = format!(r"{}\**\s*[:：]\s*\**\s*{}", regex::escape(label), value);
    let re = Regex::new(&pattern).ok()?;
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().trim_end_matches('*').trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read `CLAUDE.md` and extract the system info fields.
pub fn collect_system_info(root: &AgentRoot) -> SystemInfo {
    match read_text(&root.instructions_file()) {
        Some(text) => extract_system_info(&text),
        None => {
            tracing::debug!("CLAUDE.md not readable, system info left as placeholders");
            SystemInfo::default()
        }
    }
}

/// Any label not present renders as `"--"`.
pub fn extract_system_info(text: &str) -> SystemInfo {
    let field = |label: &str, kind: FieldKind| {
        extract_field(text, label, kind).unwrap_or_else(|| PLACEHOLDER.to_string())
    };

    SystemInfo {
        total_skills: field("总技能数", FieldKind::Number),
        total_agents: field("代理数量", FieldKind::Number),
        mcp_servers: field("MCP 服务器", FieldKind::Number),
        hooks: field("Hooks 数量", FieldKind::Number),
        system_version: field("系统版本", FieldKind::Text),
    }
}

//! Safe file reader and JSON-lines parser.

use super::record::LogRecord;
use std::path::{Path, PathBuf};

/// Read a whole file as UTF-8 text.
///
/// Returns `None` when the file is missing, unreadable or not valid UTF-8.
pub fn read_text(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "File not readable");
            None
        }
    }
}

/// Read a JSON-lines file into records, in file order.
///
/// Blank lines and lines that are not valid JSON are dropped. An unreadable
/// file yields no records.
pub fn read_jsonl(path: &Path) -> Vec<LogRecord> {
    match read_text(path) {
        Some(text) => {
            let records = parse_jsonl(&text);
            tracing::trace!(path = %path.display(), records = records.len(), "Parsed JSONL");
            records
        }
        None => Vec::new(),
    }
}

/// Parse JSON-lines text into records, in line order.
pub fn parse_jsonl(text: &str) -> Vec<LogRecord> {
    let mut records = Vec::new();
    let mut dropped = 0usize;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<serde_json::Value>(line) {
            Ok(value) => records.push(LogRecord::from_value(value)),
            Err(_) => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::debug!(dropped, kept = records.len(), "Skipped malformed JSONL lines");
    }
    records
}

/// List files in `dir` whose names match the glob `pattern`, sorted by path.
///
/// A missing directory or invalid pattern yields an empty list.
pub fn discover(dir: &Path, pattern: &str) -> Vec<PathBuf> {
    let full_pattern = dir.join(pattern);
    let pattern_str = full_pattern.to_string_lossy();

    let entries = match glob::glob(&pattern_str) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(pattern = %pattern_str, error = %e, "Invalid glob pattern");
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries.flatten().filter(|p| p.is_file()).collect();
    files.sort();
    files
}

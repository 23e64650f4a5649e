//! Directory size estimation.

use crate::format::round1;
use std::path::Path;
use walkdir::WalkDir;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Total size of all regular files under `root`, in megabytes rounded to one
/// decimal place.
///
/// Walks the full subtree with no depth limit. Symlinks are not followed.
/// Entries that cannot be read or stat'ed are skipped; a missing root is 0.
pub fn dir_size_mb(root: &Path) -> f64 {
    let mut total_bytes: u64 = 0;
    let mut skipped = 0usize;

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        match entry.metadata() {
            Ok(meta) => total_bytes += meta.len(),
            Err(_) => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(root = %root.display(), skipped, "Skipped unreadable entries while sizing");
    }

    round1(total_bytes as f64 / BYTES_PER_MB)
}

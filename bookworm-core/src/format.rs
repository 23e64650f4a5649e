//! Number formatting helpers shared by collectors and the console summary.

/// Placeholder rendered for any value that could not be determined.
pub const PLACEHOLDER: &str = "--";

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `part` as a whole-number percentage of `whole`; 0 when `whole` is 0.
pub fn percent(part: f64, whole: f64) -> u64 {
    if whole <= 0.0 {
        return 0;
    }
    (part / whole * 100.0).round().max(0.0) as u64
}

/// Format megabytes for display, switching to GB past 1024 MB.
pub fn format_mb(mb: f64) -> String {
    if mb >= 1024.0 {
        format!("{:.1} GB", mb / 1024.0)
    } else {
        format!("{:.1} MB", mb)
    }
}

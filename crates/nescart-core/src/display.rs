//! Human readable formatting helpers for the presentation layer.

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Format a byte count using 1024-based units.
///
/// The value scales through B/KB/MB/GB; one decimal place is shown when the
/// scaled value is not a whole number.
pub fn format_size(bytes: usize) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if size.fract() == 0.0 {
        format!("{} {}", size as u64, UNITS[unit])
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}

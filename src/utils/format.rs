//! Formatting utilities for sizes, timestamps, and other display values.

/// Format a file size for display (e.g., "1.5 KB", "2 MB").
///
/// Uses 1024-based units and one decimal place, with a trailing `.0`
/// trimmed. Directories carry no size and render as an em dash.
pub fn format_size(size: Option<u64>) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let Some(bytes) = size else {
        return "\u{2014}".to_string();
    };
    if bytes == 0 {
        return "0 B".to_string();
    }

    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (value * 10.0).round() / 10.0;

    if rounded.fract() == 0.0 {
        format!("{} {}", rounded as u64, UNITS[exponent])
    } else {
        format!("{:.1} {}", rounded, UNITS[exponent])
    }
}

/// Format an epoch-milliseconds timestamp as a UTC wall clock (HH:MM:SS).
pub fn format_clock(epoch_ms: f64) -> String {
    let total_secs = (epoch_ms / 1000.0).floor().max(0.0) as u64;
    let secs = total_secs % 60;
    let mins = (total_secs / 60) % 60;
    let hours = (total_secs / 3600) % 24;
    format!("{hours:02}:{mins:02}:{secs:02}")
}

/// Count with a naively pluralized noun (e.g., "1 item", "12 items").
pub fn format_count(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(None), "\u{2014}");
        assert_eq!(format_size(Some(0)), "0 B");
        assert_eq!(format_size(Some(500)), "500 B");
        assert_eq!(format_size(Some(1023)), "1023 B");
        assert_eq!(format_size(Some(1024)), "1 KB");
        assert_eq!(format_size(Some(1536)), "1.5 KB");
        assert_eq!(format_size(Some(2 * 1024 * 1024)), "2 MB");
        assert_eq!(format_size(Some(5_368_709_120)), "5 GB");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0.0), "00:00:00");
        // 12:34:56 UTC on some day
        assert_eq!(format_clock(((12 * 3600 + 34 * 60 + 56) * 1000) as f64), "12:34:56");
        assert_eq!(format_clock(-5.0), "00:00:00");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0, "item"), "0 items");
        assert_eq!(format_count(1, "item"), "1 item");
        assert_eq!(format_count(12, "item"), "12 items");
    }
}

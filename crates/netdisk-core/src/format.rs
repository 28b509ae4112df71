//! Formatting utilities for display values.

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with 1024-based units (e.g., "1.5 KB", "3.0 MB").
///
/// Plain bytes are shown without a fraction.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// Format an upload percentage for progress labels.
pub fn format_percent(percent: u8) -> String {
    format!("{}%", percent.min(100))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0 GB");
        assert_eq!(format_size(2048 * 1024 * 1024 * 1024 * 1024), "2048.0 TB");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(42), "42%");
        assert_eq!(format_percent(250), "100%");
    }
}
